pub mod defs;
pub mod state;

pub use defs::{
    Article, InteractionEvent, Query, RecommendationEntry, SourceInfo, DEFAULT_LANGUAGE,
    DEFAULT_TERM,
};
pub use state::{NavEvent, NavSelection, SelectionChange};
