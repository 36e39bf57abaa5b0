//! Concrete suggesters.

use search_dsl_shared::param_enum;

pub mod completion;
pub mod phrase;
pub mod term;

pub use completion::{CompletionSuggester, FuzzyOptions};
pub use phrase::{DirectGenerator, PhraseSuggester, SmoothingKind, SmoothingModel};
pub use term::{StringDistance, TermSuggestSort, TermSuggester};

param_enum! {
    /// Which terms suggestions are generated for.
    pub enum SuggestMode("suggest_mode", "search-suggesters.html", Lower) {
        Missing => "missing",
        Popular => "popular",
        Always => "always",
    }
}
