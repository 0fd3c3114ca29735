pub mod insights;
pub mod mood_scorer;
pub mod pattern_detector;
pub mod refresh;
pub mod signal_miner;
pub mod weekly_chart;
pub mod wellbeing;
