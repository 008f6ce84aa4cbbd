//! Per-step timing of a conversion, with how much each step got through.

use std::time::Instant;

pub struct Profiler {
    start_time: Instant,
    curr: Option<Step>,
    done: Vec<StepReport>,
}

struct Step {
    start_time: Instant,
    name: String,
    unit: &'static str,
    items: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub name: String,
    pub unit: &'static str,
    pub items: usize,
    pub seconds: f64,
}

impl StepReport {
    /// Items per second, once the step has taken measurable time.
    pub fn rate(&self) -> Option<f64> {
        if self.seconds > 0.0 {
            Some(self.items as f64 / self.seconds)
        } else {
            None
        }
    }
}

impl Profiler {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            curr: None,
            done: Vec::new(),
        }
    }

    /// Closes the running step and opens a new one counting `unit`s.
    pub fn step(&mut self, step_name: &str, unit: &'static str) {
        self.finish();
        info!("{} - START", step_name);
        self.curr = Some(Step {
            start_time: Instant::now(),
            name: step_name.to_string(),
            unit,
            items: 0,
        });
    }

    /// Credits `items` to the running step. Ignored between steps.
    pub fn count(&mut self, items: usize) {
        if let Some(ref mut step) = self.curr {
            step.items += items;
        }
    }

    pub fn finish(&mut self) {
        if let Some(step) = self.curr.take() {
            let report = StepReport {
                seconds: step.start_time.elapsed().as_secs_f64(),
                name: step.name,
                unit: step.unit,
                items: step.items,
            };
            match report.rate() {
                Some(rate) => info!(
                    "{} - STOP {:.3} s, {} {} ({:.0} {}/s)",
                    report.name, report.seconds, report.items, report.unit, rate, report.unit
                ),
                None => info!(
                    "{} - STOP {:.3} s, {} {}",
                    report.name, report.seconds, report.items, report.unit
                ),
            }
            self.done.push(report);
        }
    }

    pub fn reports(&self) -> &[StepReport] {
        &self.done
    }

    pub fn total(&mut self) {
        self.finish();
        info!(
            "TOTAL - {:.3} s over {} steps",
            self.start_time.elapsed().as_secs_f64(),
            self.done.len()
        );
    }
}

impl Drop for Profiler {
    fn drop(&mut self) {
        self.total()
    }
}
