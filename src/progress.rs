use crate::config::PROGRESS_BAR_ID;
use crate::dom::{Document, ScrollMetrics};

/// Percentage of the scrollable range already scrolled, in `[0, 100]`.
///
/// A page that cannot scroll has no range to divide by and reports `0`.
pub fn scroll_percent(metrics: ScrollMetrics) -> f64 {
    let range = metrics.scroll_height - metrics.client_height;
    if !range.is_finite() || range <= 0.0 {
        return 0.0;
    }

    (metrics.scroll_top / range * 100.0).clamp(0.0, 100.0)
}

pub fn update_progress_bar<D: Document>(document: &D) -> Option<f64> {
    let percent = scroll_percent(document.scroll_metrics());
    let bar = document.element_by_id(PROGRESS_BAR_ID)?;
    document.set_style(&bar, "width", &format!("{percent}%"));
    Some(percent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeDocument;

    fn metrics(scroll_top: f64, scroll_height: f64, client_height: f64) -> ScrollMetrics {
        ScrollMetrics {
            scroll_top,
            scroll_height,
            client_height,
        }
    }

    #[test]
    fn halfway_down_is_fifty_percent() {
        assert_eq!(scroll_percent(metrics(50.0, 200.0, 100.0)), 50.0);
    }

    #[test]
    fn unscrollable_page_is_not_a_positive_percentage() {
        let percent = scroll_percent(metrics(0.0, 100.0, 100.0));

        assert!(!(percent.is_finite() && percent > 0.0));
        assert_eq!(percent, 0.0);
    }

    #[test]
    fn overscroll_is_clamped() {
        assert_eq!(scroll_percent(metrics(-20.0, 200.0, 100.0)), 0.0);
        assert_eq!(scroll_percent(metrics(140.0, 200.0, 100.0)), 100.0);
    }

    #[test]
    fn bar_width_follows_scroll_position() {
        let mut document = FakeDocument::new();
        let bar = document.add_with_id(PROGRESS_BAR_ID);
        document.set_scroll_metrics(25.0, 200.0, 100.0);

        assert_eq!(update_progress_bar(&document), Some(25.0));
        assert_eq!(document.style(bar, "width").as_deref(), Some("25%"));
    }

    #[test]
    fn missing_bar_is_skipped() {
        let document = FakeDocument::new();
        document.set_scroll_metrics(25.0, 200.0, 100.0);

        assert_eq!(update_progress_bar(&document), None);
        assert_eq!(document.style_writes(), 0);
    }
}
