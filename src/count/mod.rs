pub mod easiness;

pub use easiness::{Easiness, MAX_CALIBRATED_VARS, count_models, measure_easiness};
