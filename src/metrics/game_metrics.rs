use std::time::{Duration, Instant};

/// Session statistics shown next to the board; kept in memory only
pub struct GameMetrics {
    /// When the current game started; `None` while idle
    pub start_time: Option<Instant>,
    pub elapsed_time: Duration,
    pub best_score: u32,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: None,
            elapsed_time: Duration::ZERO,
            best_score: 0,
            games_played: 0,
        }
    }

    /// Refresh the game clock; a finished game keeps its final time
    pub fn update(&mut self) {
        if let Some(start) = self.start_time {
            self.elapsed_time = start.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Some(Instant::now());
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.update();
        self.start_time = None;
        self.games_played += 1;
        if final_score > self.best_score {
            self.best_score = final_score;
        }
    }

    /// Clear the clock for a fresh idle board
    pub fn on_reset(&mut self) {
        self.start_time = None;
        self.elapsed_time = Duration::ZERO;
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_best_score_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(30);
        assert_eq!(metrics.best_score, 30);
        assert_eq!(metrics.games_played, 1);

        metrics.on_game_over(15);
        assert_eq!(metrics.best_score, 30); // Should not decrease
        assert_eq!(metrics.games_played, 2);

        metrics.on_game_over(45);
        assert_eq!(metrics.best_score, 45);
        assert_eq!(metrics.games_played, 3);
    }

    #[test]
    fn test_clock_runs_only_during_game() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(20));
        metrics.update();
        assert_eq!(metrics.elapsed_time, Duration::ZERO);

        metrics.on_game_start();
        std::thread::sleep(Duration::from_millis(50));
        metrics.on_game_over(10);
        let final_time = metrics.elapsed_time;
        assert!(final_time.as_millis() >= 50);

        std::thread::sleep(Duration::from_millis(20));
        metrics.update();
        assert_eq!(metrics.elapsed_time, final_time);

        metrics.on_reset();
        assert_eq!(metrics.elapsed_time, Duration::ZERO);
    }
}
