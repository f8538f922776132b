use super::HackerScreen;
use std::time::Instant;

impl HackerScreen {
    /// 触发所有到期的定时器（由主循环调用），返回是否需要重绘
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(m) = self.mounted.as_mut() else {
            return false;
        };
        self.last_advance = Some(now);
        let entropy = &mut *self.entropy;
        let clock = &*self.clock;

        let mut changed = false;
        let clock_fired = m.clock_timer.fired(now) > 0;
        if clock_fired {
            self.now = clock.now();
            changed = true;
        }
        if let Some(rain) = m.rain.as_mut() {
            changed |= rain.advance(now, entropy);
        }
        changed |= m.command.advance(now);
        let monitor_changed = m.monitor.advance(now, entropy);
        // 时钟刷新整个屏幕时监视器读数也重新生成
        if clock_fired && !monitor_changed {
            m.monitor.reroll(entropy);
        }
        changed |= monitor_changed;
        changed |= m.network.advance(now, entropy, clock);
        changed |= m.code.advance(now);
        changed |= m.progress.advance(now, entropy);
        changed
    }
}
