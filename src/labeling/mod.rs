pub mod aggregator;
pub mod history;
pub mod judgment;
pub mod labeler;
pub mod resolver;

pub use aggregator::{aggregate, contains_negative, JudgmentRow};
pub use history::DefaultHistoryIndex;
pub use judgment::judge;
pub use labeler::DefaultLabeler;
pub use resolver::{bond_issuer_map, BondIssuerMap, EntityResolver, ResolvedRecord};
