/// Tunable knobs for a single [`crate::search::execute`] call.
///
/// `promotion_piece` is deliberately absent: promotion is fixed to queen
/// (see DESIGN.md's Open Question resolution), so there is nothing to configure.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub max_depth: u8,
    pub tt_size_mb: usize,
    pub threads: usize,
    pub aspiration: bool,
    /// Per-thread node budget for quiescence search before it gives up and
    /// returns the stand-pat score.
    pub quiescence_budget: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 6,
            tt_size_mb: 64,
            threads: num_cpus::get(),
            aspiration: true,
            quiescence_budget: 300_000,
        }
    }
}
