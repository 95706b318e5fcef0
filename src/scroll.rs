//! Incremental loading of infinite-scroll pages.
//!
//! Activity feeds render more items as the viewport approaches the bottom.
//! The loader scrolls, waits, re-measures and stops on the first of: the
//! caller's item target being met, the page height no longer growing, or
//! the scroll ceiling. A failed height read stops loading immediately.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::SessionResult;

/// The browser operations the loader needs.
pub trait ScrollDriver {
    fn scroll_to_bottom(&mut self) -> SessionResult<()>;
    fn page_height(&mut self) -> SessionResult<u64>;
    /// Number of elements currently matching `selector`.
    fn count(&mut self, selector: &str) -> SessionResult<usize>;
    fn pause(&mut self, duration: Duration);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollPolicy {
    pub pause: Duration,
    pub max_scrolls: usize,
}

impl ScrollPolicy {
    pub const fn new(pause_secs: u64, max_scrolls: usize) -> Self {
        Self {
            pause: Duration::from_secs(pause_secs),
            max_scrolls,
        }
    }
}

/// Stop early once `count` elements match `selector`.
#[derive(Debug, Clone, Copy)]
pub struct Target<'a> {
    pub selector: &'a str,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    TargetReached,
    Plateau,
    Ceiling,
    /// Scrolling or measuring failed; treated as "no more content".
    Stalled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollReport {
    pub scrolls: usize,
    pub reason: StopReason,
}

fn target_met<D: ScrollDriver + ?Sized>(driver: &mut D, target: Option<Target<'_>>) -> bool {
    let Some(target) = target else {
        return false;
    };
    match driver.count(target.selector) {
        Ok(found) => {
            debug!(target: "harvest.scroll", found, wanted = target.count, "Counted loaded items");
            found >= target.count
        }
        Err(err) => {
            debug!(target: "harvest.scroll", error = %err, "Item count unavailable");
            false
        }
    }
}

/// Scroll until the target is met, the page stops growing, or the ceiling
/// is hit. Never performs more than `policy.max_scrolls` scrolls.
pub fn load_incrementally<D: ScrollDriver + ?Sized>(
    driver: &mut D,
    policy: &ScrollPolicy,
    target: Option<Target<'_>>,
) -> ScrollReport {
    let mut last_height = match driver.page_height() {
        Ok(height) => height,
        Err(err) => {
            warn!(target: "harvest.scroll", error = %err, "Could not read page height, not scrolling");
            return ScrollReport {
                scrolls: 0,
                reason: StopReason::Stalled,
            };
        }
    };

    if target_met(driver, target) {
        return ScrollReport {
            scrolls: 0,
            reason: StopReason::TargetReached,
        };
    }

    let mut scrolls = 0;
    let reason = loop {
        if scrolls >= policy.max_scrolls {
            break StopReason::Ceiling;
        }

        if let Err(err) = driver.scroll_to_bottom() {
            warn!(target: "harvest.scroll", error = %err, "Scroll failed");
            break StopReason::Stalled;
        }
        driver.pause(policy.pause);
        scrolls += 1;

        let height = match driver.page_height() {
            Ok(height) => height,
            Err(err) => {
                warn!(target: "harvest.scroll", error = %err, "Could not read page height");
                break StopReason::Stalled;
            }
        };

        if target_met(driver, target) {
            break StopReason::TargetReached;
        }
        if height == last_height {
            break StopReason::Plateau;
        }
        last_height = height;
    };

    info!(target: "harvest.scroll", scrolls, ?reason, "Finished loading");
    ScrollReport { scrolls, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SessionError;

    /// Page whose height follows a script; repeats the last entry forever.
    struct ScriptedPage {
        heights: Vec<u64>,
        reads: usize,
        items_per_scroll: usize,
        scrolled: usize,
        fail_height_after: Option<usize>,
    }

    impl ScriptedPage {
        fn new(heights: Vec<u64>) -> Self {
            Self {
                heights,
                reads: 0,
                items_per_scroll: 0,
                scrolled: 0,
                fail_height_after: None,
            }
        }
    }

    impl ScrollDriver for ScriptedPage {
        fn scroll_to_bottom(&mut self) -> SessionResult<()> {
            self.scrolled += 1;
            Ok(())
        }

        fn page_height(&mut self) -> SessionResult<u64> {
            if let Some(limit) = self.fail_height_after {
                if self.reads >= limit {
                    return Err(SessionError::Timeout {
                        what: "document height".to_string(),
                    });
                }
            }
            let index = self.reads.min(self.heights.len() - 1);
            self.reads += 1;
            Ok(self.heights[index])
        }

        fn count(&mut self, _selector: &str) -> SessionResult<usize> {
            Ok(self.scrolled * self.items_per_scroll)
        }

        fn pause(&mut self, _duration: Duration) {}
    }

    fn growing_page() -> ScriptedPage {
        ScriptedPage::new((1..=1000).map(|i| i * 500).collect())
    }

    #[test]
    fn test_perpetual_growth_respects_ceiling() {
        for ceiling in [0, 1, 5, 15] {
            let mut page = growing_page();
            let report = load_incrementally(&mut page, &ScrollPolicy::new(0, ceiling), None);
            assert_eq!(report.scrolls, ceiling);
            assert_eq!(report.reason, StopReason::Ceiling);
            assert_eq!(page.scrolled, ceiling);
        }
    }

    #[test]
    fn test_plateau_stops_loading() {
        let mut page = ScriptedPage::new(vec![1000, 2000, 3000, 3000]);
        let report = load_incrementally(&mut page, &ScrollPolicy::new(0, 15), None);
        assert_eq!(report.reason, StopReason::Plateau);
        assert_eq!(report.scrolls, 3);
    }

    #[test]
    fn test_target_reached_exits_early() {
        let mut page = growing_page();
        page.items_per_scroll = 4;
        let target = Target {
            selector: ".comments-comment-entity",
            count: 10,
        };
        let report = load_incrementally(&mut page, &ScrollPolicy::new(0, 15), Some(target));
        assert_eq!(report.reason, StopReason::TargetReached);
        assert_eq!(report.scrolls, 3);
    }

    #[test]
    fn test_target_already_met_skips_scrolling() {
        let mut page = growing_page();
        let target = Target {
            selector: "li",
            count: 0,
        };
        let report = load_incrementally(&mut page, &ScrollPolicy::new(0, 15), Some(target));
        assert_eq!(report.scrolls, 0);
        assert_eq!(report.reason, StopReason::TargetReached);
        assert_eq!(page.scrolled, 0);
    }

    #[test]
    fn test_height_read_failure_is_fail_closed() {
        let mut page = growing_page();
        page.fail_height_after = Some(2);
        let report = load_incrementally(&mut page, &ScrollPolicy::new(0, 15), None);
        assert_eq!(report.reason, StopReason::Stalled);
        assert_eq!(report.scrolls, 2);

        let mut page = growing_page();
        page.fail_height_after = Some(0);
        let report = load_incrementally(&mut page, &ScrollPolicy::new(0, 15), None);
        assert_eq!(report.reason, StopReason::Stalled);
        assert_eq!(page.scrolled, 0);
    }
}
