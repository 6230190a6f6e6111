/// Receives progress of long-running builders.
///
/// Builders call [`begin`](Progress::begin) once with the number of steps,
/// [`update`](Progress::update) with the number of steps completed so far,
/// and [`end`](Progress::end) when done, including on early error returns.
pub trait Progress {
    fn begin(&mut self, total: usize);
    fn update(&mut self, done: usize);
    fn end(&mut self);
}

/// A progress sink that ignores every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn begin(&mut self, _total: usize) {}
    fn update(&mut self, _done: usize) {}
    fn end(&mut self) {}
}

/// A progress sink that records every report, useful for hosts that poll.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressLog {
    /// Total announced by the last `begin`.
    pub total: usize,
    /// Every value passed to `update`, in order.
    pub updates: Vec<usize>,
    /// Whether `end` has been called since the last `begin`.
    pub finished: bool,
}

impl Progress for ProgressLog {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.updates.clear();
        self.finished = false;
    }

    fn update(&mut self, done: usize) {
        self.updates.push(done);
    }

    fn end(&mut self) {
        self.finished = true;
    }
}
