#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod cache;
pub mod config;
pub mod controller;
pub mod fetch;
pub mod i18n;
pub mod rate_limit;
pub mod repository;
pub mod session;
pub mod templates;
pub mod view;

pub use cache::{load_records, store_records, CacheError, FileCache, MemoryCache, SessionCache};
pub use config::{ConfigError, ShowcaseConfig};
pub use controller::{LoadOrigin, ProjectList};
pub use fetch::{FetchError, GithubSource, RepositorySource};
pub use i18n::{I18nError, Translations};
pub use rate_limit::{check_core_rate_limit, RateLimitInfo};
pub use repository::RepositoryRecord;
pub use session::{Command, Flow, Session, SessionConfig, SessionError, HELP};
pub use templates::{CardLabels, CardRenderer, TemplateError};
pub use view::{ListEntry, MessageKind, PageView, View};
