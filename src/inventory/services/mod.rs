mod dockerfile_classifier;
mod from_line_extractor;
mod language_filter;
mod repository_filter;

pub use dockerfile_classifier::DockerfileClassifier;
pub use from_line_extractor::FromLineExtractor;
pub use language_filter::LanguageFilter;
pub use repository_filter::RepositoryFilter;
