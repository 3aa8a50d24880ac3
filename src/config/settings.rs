//! Runtime settings that can be modified during application execution
//!
//! These settings control how the chart is displayed right now and are
//! seeded from [`ChartConfig`](super::ChartConfig) at startup. They are not
//! written back to the config file.

use super::ChartConfig;

/// Smallest visible time window in seconds
const MIN_TIME_WINDOW: f64 = 1.0;

/// Runtime display settings for the chart
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeSettings {
    /// Keep the latest data in view
    pub follow_latest: bool,

    /// Freeze the view; data keeps being collected
    pub paused: bool,

    /// Visible time window in seconds
    pub display_time_window: f64,

    /// Maximum allowed time window in seconds
    pub max_time_window: f64,

    pub show_legend: bool,

    pub line_width: f32,

    pub include_zero: bool,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self::from_chart_config(&ChartConfig::default())
    }
}

impl RuntimeSettings {
    /// Seed runtime settings from the persistent chart config
    pub fn from_chart_config(config: &ChartConfig) -> Self {
        Self {
            follow_latest: true,
            paused: false,
            display_time_window: config.time_window_secs.max(MIN_TIME_WINDOW),
            max_time_window: 3600.0,
            show_legend: config.show_legend,
            line_width: config.line_width,
            include_zero: config.include_zero,
        }
    }

    /// Toggle pause state. Resuming follows the latest data again.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        if !self.paused {
            self.follow_latest = true;
        }
    }

    /// Update time window from user zoom, respecting limits
    pub fn update_time_window(&mut self, new_window: f64) {
        self.display_time_window = new_window.clamp(MIN_TIME_WINDOW, self.max_time_window);
    }

    /// Whether the plot should track the newest sample this frame
    pub fn is_following(&self) -> bool {
        self.follow_latest && !self.paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_from_chart_config() {
        let config = ChartConfig {
            time_window_secs: 12.0,
            show_legend: false,
            ..Default::default()
        };
        let settings = RuntimeSettings::from_chart_config(&config);
        assert_eq!(settings.display_time_window, 12.0);
        assert!(!settings.show_legend);
        assert!(settings.is_following());
    }

    #[test]
    fn test_time_window_clamped() {
        let mut settings = RuntimeSettings::default();
        settings.update_time_window(0.01);
        assert_eq!(settings.display_time_window, MIN_TIME_WINDOW);
        settings.update_time_window(1e9);
        assert_eq!(settings.display_time_window, settings.max_time_window);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut settings = RuntimeSettings::default();
        settings.follow_latest = false;
        settings.toggle_pause();
        assert!(!settings.is_following());
        settings.toggle_pause();
        assert!(settings.is_following());
    }
}
