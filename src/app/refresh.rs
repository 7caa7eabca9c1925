use std::time::Instant;

use crate::logic::countdown;
use crate::model::CodeCell;
use crate::App;

impl App {
    /// One scheduler tick: move the countdown, regenerate on a new step
    pub(crate) fn on_tick(&mut self, now_secs: f64) {
        let decision = countdown::decide(now_secs, self.model.store.last_epoch);
        self.model.view.remaining = decision.remaining;

        if decision.regenerate {
            self.regenerate_codes(now_secs);
            self.model.store.last_epoch = Some(decision.epoch);
        }

        self.model.ui.expire(Instant::now());
    }

    /// Recompute every displayed code for the step containing `now_secs`
    pub(crate) fn regenerate_codes(&mut self, now_secs: f64) {
        let unix = now_secs.max(0.0).floor() as u64;
        let mut failures = 0;

        for account in self.model.store.iter() {
            let cell = match self.engine.generate(account, unix) {
                Ok(code) => CodeCell::Code(code),
                Err(e) => {
                    failures += 1;
                    tracing::debug!(id = %account.id, "code generation failed: {:#}", e);
                    CodeCell::Error
                }
            };
            self.model.view.codes.insert(account.id, cell);
        }

        if failures > 0 {
            tracing::debug!(failures, "regenerated codes with errors");
        }
    }
}
