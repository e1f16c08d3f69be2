//! Animation scheduler - advances every active task once per tick

use crate::fx::AnimTask;
use crate::services::Renderer;

/// Flat schedule of active animation tasks. Tasks are advanced in insertion
/// order and dropped the tick they report completion.
#[derive(Debug, Default)]
pub struct Scheduler {
    tasks: Vec<AnimTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, task: AnimTask) {
        self.tasks.push(task);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Advance every task by `dt_ms`, retaining the unfinished ones
    pub fn advance(&mut self, dt_ms: u32, render: &mut dyn Renderer) {
        self.tasks.retain_mut(|task| !task.advance(dt_ms, render));
    }

    /// Drop every task, destroying visuals owned by tasks (teardown path)
    pub fn cancel_all(&mut self, render: &mut dyn Renderer) {
        for task in self.tasks.drain(..) {
            task.dispose(render);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fx::Vec2;
    use crate::services::{NullRenderer, VisualId};

    #[test]
    fn test_tasks_drain_as_they_complete() {
        let mut render = NullRenderer::default();
        let mut sched = Scheduler::new();
        sched.push(AnimTask::drop(
            VisualId::new(1),
            Vec2::new(0.0, 5.0),
            Vec2::new(0.0, 0.0),
            100,
        ));
        sched.push(AnimTask::drop(
            VisualId::new(2),
            Vec2::new(1.0, 5.0),
            Vec2::new(1.0, 0.0),
            300,
        ));
        assert_eq!(sched.len(), 2);

        // Past the short task's duration, before the long one's
        for _ in 0..10 {
            sched.advance(16, &mut render);
        }
        assert_eq!(sched.len(), 1);

        for _ in 0..10 {
            sched.advance(16, &mut render);
        }
        assert!(sched.is_idle());
    }

    #[test]
    fn test_cancel_all_empties_schedule() {
        let mut render = NullRenderer::default();
        let mut sched = Scheduler::new();
        sched.push(AnimTask::removal(VisualId::new(1), 2.0, 300));
        sched.push(AnimTask::shake(0.2, 400, 9));

        sched.cancel_all(&mut render);
        assert!(sched.is_idle());
    }
}
