//! Pagination window
//!
//! At most [`MAX_VISIBLE_PAGES`] contiguous page numbers centred on the
//! current page, first/last shortcuts with ellipses when the window does
//! not reach an edge, and prev/next controls. A disabled control carries
//! no target, so an out-of-range page can never be requested from it.

use std::fmt;

/// Width of the page-number window
pub const MAX_VISIBLE_PAGES: u32 = 5;

/// Everything a pager needs to draw itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    pub current: u32,
    pub total: u32,
    /// Contiguous page numbers
    pub pages: Vec<u32>,
    /// Shortcut to page 1 when the window starts later
    pub first: Option<u32>,
    pub leading_ellipsis: bool,
    /// Shortcut to the last page when the window ends earlier
    pub last: Option<u32>,
    pub trailing_ellipsis: bool,
    /// Target of the previous control; `None` when disabled
    pub prev: Option<u32>,
    /// Target of the next control; `None` when disabled
    pub next: Option<u32>,
}

/// One drawable element, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Prev(Option<u32>),
    Page { number: u32, current: bool },
    Ellipsis,
    Next(Option<u32>),
}

/// Compute the window for `current` out of `total` pages.
///
/// `current` is clamped into `1..=total`. Zero pages yields an empty window
/// with both controls disabled.
pub fn page_window(current: u32, total: u32) -> PageWindow {
    if total == 0 {
        return PageWindow {
            current: 0,
            total: 0,
            pages: Vec::new(),
            first: None,
            leading_ellipsis: false,
            last: None,
            trailing_ellipsis: false,
            prev: None,
            next: None,
        };
    }

    let current = current.clamp(1, total);
    let half = MAX_VISIBLE_PAGES / 2;
    let mut start = current.saturating_sub(half).max(1);
    let end = total.min(start.saturating_add(MAX_VISIBLE_PAGES - 1));
    if end - start + 1 < MAX_VISIBLE_PAGES {
        start = end.saturating_sub(MAX_VISIBLE_PAGES - 1).max(1);
    }

    PageWindow {
        current,
        total,
        pages: (start..=end).collect(),
        first: (start > 1).then_some(1),
        leading_ellipsis: start > 2,
        last: (end < total).then_some(total),
        trailing_ellipsis: end < total - 1,
        prev: (current > 1).then(|| current - 1),
        next: (current < total).then(|| current + 1),
    }
}

impl PageWindow {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Elements in display order
    pub fn items(&self) -> Vec<PageItem> {
        let mut items = vec![PageItem::Prev(self.prev)];
        if let Some(first) = self.first {
            items.push(PageItem::Page {
                number: first,
                current: first == self.current,
            });
            if self.leading_ellipsis {
                items.push(PageItem::Ellipsis);
            }
        }
        items.extend(self.pages.iter().map(|&number| PageItem::Page {
            number,
            current: number == self.current,
        }));
        if let Some(last) = self.last {
            if self.trailing_ellipsis {
                items.push(PageItem::Ellipsis);
            }
            items.push(PageItem::Page {
                number: last,
                current: last == self.current,
            });
        }
        items.push(PageItem::Next(self.next));
        items
    }
}

impl fmt::Display for PageWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .items()
            .into_iter()
            .map(|item| match item {
                PageItem::Prev(Some(_)) => "<".to_string(),
                PageItem::Prev(None) => "-".to_string(),
                PageItem::Next(Some(_)) => ">".to_string(),
                PageItem::Next(None) => "-".to_string(),
                PageItem::Ellipsis => "...".to_string(),
                PageItem::Page { number, current: true } => format!("[{number}]"),
                PageItem::Page { number, .. } => number.to_string(),
            })
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_properties_hold_for_all_pages() {
        for total in 1..=30u32 {
            for current in 1..=total {
                let w = page_window(current, total);
                assert_eq!(
                    w.pages.len() as u32,
                    total.min(MAX_VISIBLE_PAGES),
                    "c={current} t={total}"
                );
                assert!(w.pages.windows(2).all(|p| p[1] == p[0] + 1));
                assert!(w.pages.contains(&current));
                if current <= 3 {
                    assert!(w.pages.contains(&1), "c={current} t={total}");
                }
                if current + 2 >= total {
                    assert!(w.pages.contains(&total), "c={current} t={total}");
                }
                assert!(w.pages.iter().all(|&p| (1..=total).contains(&p)));
                assert!(w.prev.is_none_or(|p| p >= 1));
                assert!(w.next.is_none_or(|p| p <= total));
            }
        }
    }

    #[test]
    fn test_middle_of_long_range() {
        let w = page_window(10, 20);
        assert_eq!(w.pages, vec![8, 9, 10, 11, 12]);
        assert_eq!(w.first, Some(1));
        assert!(w.leading_ellipsis);
        assert_eq!(w.last, Some(20));
        assert!(w.trailing_ellipsis);
        assert_eq!((w.prev, w.next), (Some(9), Some(11)));
        assert_eq!(w.to_string(), "< 1 ... 8 9 [10] 11 12 ... 20 >");
    }

    #[test]
    fn test_edges() {
        let w = page_window(1, 3);
        assert_eq!(w.pages, vec![1, 2, 3]);
        assert_eq!(w.prev, None);
        assert_eq!(w.first, None);
        assert_eq!(w.last, None);

        let w = page_window(7, 7);
        assert_eq!(w.pages, vec![3, 4, 5, 6, 7]);
        assert_eq!(w.next, None);
        assert_eq!(w.first, Some(1));
        assert!(w.leading_ellipsis);

        // Adjacent shortcut needs no ellipsis
        let w = page_window(4, 6);
        assert_eq!(w.pages, vec![2, 3, 4, 5, 6]);
        assert_eq!(w.first, Some(1));
        assert!(!w.leading_ellipsis);
    }

    #[test]
    fn test_empty_and_out_of_range() {
        let w = page_window(1, 0);
        assert!(w.is_empty());
        assert!(w.pages.is_empty());
        assert_eq!((w.prev, w.next), (None, None));

        let w = page_window(9, 4);
        assert_eq!(w.current, 4);
        assert_eq!(w.next, None);

        let w = page_window(0, 4);
        assert_eq!(w.current, 1);
        assert_eq!(w.prev, None);
    }

    #[test]
    fn test_huge_page_count_does_not_overflow() {
        let w = page_window(u32::MAX, u32::MAX);
        assert_eq!(w.pages, ((u32::MAX - 4)..=u32::MAX).collect::<Vec<_>>());
        assert_eq!(w.first, Some(1));
        assert_eq!(w.last, None);
        assert!(!w.trailing_ellipsis);
        assert_eq!(w.next, None);

        let w = page_window(1, u32::MAX);
        assert_eq!(w.pages, vec![1, 2, 3, 4, 5]);
        assert_eq!(w.last, Some(u32::MAX));
        assert!(w.trailing_ellipsis);
    }
}
