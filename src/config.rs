/// Options for guard grammar generation.
///
/// The defaults reproduce the full, deliberately redundant grammar.
///
/// # Examples
///
/// ```
/// use heap_synth::config::GuardConfig;
///
/// let config = GuardConfig {
///     deduplicate: true,
///     ..GuardConfig::default()
/// };
/// assert!(config.compose);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardConfig {
    /// Drop structurally equal guards after sorting, keeping the first
    /// occurrence (default: false).
    pub deduplicate: bool,
    /// Build negations, cubes and disjunctions on top of the basic literals
    /// (default: true). When off, only the basic literals are returned.
    pub compose: bool,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            deduplicate: false,
            compose: true,
        }
    }
}
