pub const DEFAULT_ROUNDS: usize = 100_000;
pub const DEFAULT_PARALLELISM: usize = 8;
pub const DEFAULT_CHECKPOINT_INTERVAL: usize = 5000;

pub const DEFAULT_TABLE_DIR: &str = "./strategy/QL_dict";
pub const DEFAULT_CHECKPOINT_LOG: &str = "./strategy/QL_dict/averageQ.txt";
pub const DEFAULT_ELO_PATH: &str = "./matching/strategy_rating.json";
pub const DEFAULT_TRUESKILL_PATH: &str = "./matching/trueskill.json";
pub const DEFAULT_REPORT_PATH: &str = "./matching/report.json";
