use std::time::Instant;

/// Instantaneous frame rate: the reciprocal of the time since the previous sample.
#[derive(Debug, Default)]
pub struct FpsCounter {
    last: Option<Instant>,
    fps: f64,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first sample has nothing to compare against and reports 0.
    pub fn sample(&mut self, now: Instant) -> f64 {
        self.fps = match self.last {
            Some(last) => {
                let delta = now.saturating_duration_since(last).as_secs_f64();
                if delta > 0.0 { 1.0 / delta } else { self.fps }
            }
            None => 0.0,
        };
        self.last = Some(now);
        self.fps
    }

    #[cfg(test)]
    pub(crate) fn fps(&self) -> f64 {
        self.fps
    }
}
