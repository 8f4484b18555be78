/// Domain layer: the values compared between two releases and the pure
/// rules that decide which vulnerabilities were fixed
pub mod domain;
pub mod services;
