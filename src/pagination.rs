//! This module defines the common functionality for paging data.

use maud::{Markup, html};

use crate::Error;

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The number of rows to display per page.
    pub page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            page_size: 6,
        }
    }
}

/// A single marker in the pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken {
    /// A numbered page.
    Page(u64),
    /// A gap between page numbers.
    Ellipsis,
}

/// The number of pages at or below which every page number is shown with no
/// ellipsis.
const FULL_WINDOW_THRESHOLD: u64 = 7;

/// Calculate the sequence of page numbers and ellipsis markers to display
/// in the pagination control.
///
/// The window has a fixed width (at most seven tokens) so the control stays
/// visually stable regardless of the page count:
///
/// - Seven or fewer pages: every page, no ellipsis.
/// - Current page within the first three: the first three pages, an
///   ellipsis, and the last two.
/// - Current page within the last three: the first two pages, an ellipsis,
///   and the last three.
/// - Otherwise: the first page, an ellipsis, the current page with its two
///   neighbours, another ellipsis, and the last page.
///
/// Callers are responsible for clamping `current_page` to at most
/// `total_pages`; this function does not.
///
/// # Errors
/// Returns [Error::InvalidPageNumber] if `current_page` or `total_pages`
/// is zero. Pages are 1-indexed.
pub fn generate_pagination(current_page: u64, total_pages: u64) -> Result<Vec<PageToken>, Error> {
    if current_page == 0 || total_pages == 0 {
        return Err(Error::InvalidPageNumber(current_page, total_pages));
    }

    if total_pages <= FULL_WINDOW_THRESHOLD {
        return Ok((1..=total_pages).map(PageToken::Page).collect());
    }

    if current_page <= 3 {
        return Ok(vec![
            PageToken::Page(1),
            PageToken::Page(2),
            PageToken::Page(3),
            PageToken::Ellipsis,
            PageToken::Page(total_pages - 1),
            PageToken::Page(total_pages),
        ]);
    }

    if current_page >= total_pages - 2 {
        return Ok(vec![
            PageToken::Page(1),
            PageToken::Page(2),
            PageToken::Ellipsis,
            PageToken::Page(total_pages - 2),
            PageToken::Page(total_pages - 1),
            PageToken::Page(total_pages),
        ]);
    }

    Ok(vec![
        PageToken::Page(1),
        PageToken::Ellipsis,
        PageToken::Page(current_page - 1),
        PageToken::Page(current_page),
        PageToken::Page(current_page + 1),
        PageToken::Ellipsis,
        PageToken::Page(total_pages),
    ])
}

const PAGE_LINK_STYLE: &str = "flex items-center justify-center px-3 h-8 \
    leading-tight text-gray-500 bg-white border border-gray-300 \
    hover:bg-gray-100 hover:text-gray-700 dark:bg-gray-800 \
    dark:border-gray-700 dark:text-gray-400 dark:hover:bg-gray-700 \
    dark:hover:text-white";

const CURRENT_PAGE_STYLE: &str = "flex items-center justify-center px-3 h-8 \
    text-white bg-blue-600 border border-blue-600 dark:border-blue-500 \
    dark:bg-blue-500";

const ELLIPSIS_STYLE: &str = "flex items-center justify-center px-3 h-8 \
    leading-tight text-gray-500 bg-white border border-gray-300 \
    dark:bg-gray-800 dark:border-gray-700 dark:text-gray-400";

/// Render the pagination control for `current_page` of `total_pages`.
///
/// `page_url` maps a page number to the URL of that page so the markup
/// stays independent of the route and its query parameters.
///
/// # Errors
/// Returns [Error::InvalidPageNumber] if either page number is zero.
pub fn pagination_nav(
    current_page: u64,
    total_pages: u64,
    page_url: &dyn Fn(u64) -> String,
) -> Result<Markup, Error> {
    let tokens = generate_pagination(current_page, total_pages)?;

    let token_html = |token: &PageToken| match *token {
        PageToken::Page(page) if page == current_page => html!(
            li { span aria-current="page" class=(CURRENT_PAGE_STYLE) { (page) } }
        ),
        PageToken::Page(page) => html!(
            li { a href=(page_url(page)) class=(PAGE_LINK_STYLE) { (page) } }
        ),
        PageToken::Ellipsis => html!(
            li { span class=(ELLIPSIS_STYLE) { "..." } }
        ),
    };

    Ok(html!(
        nav aria-label="Pagination"
        {
            ul class="inline-flex -space-x-px text-sm"
            {
                @if current_page > 1 {
                    li
                    {
                        a
                            href=(page_url(current_page - 1))
                            rel="prev"
                            class=(PAGE_LINK_STYLE)
                        {
                            "Previous"
                        }
                    }
                }

                @for token in &tokens {
                    (token_html(token))
                }

                @if current_page < total_pages {
                    li
                    {
                        a
                            href=(page_url(current_page + 1))
                            rel="next"
                            class=(PAGE_LINK_STYLE)
                        {
                            "Next"
                        }
                    }
                }
            }
        }
    ))
}

#[cfg(test)]
mod generate_pagination_tests {
    use crate::{
        Error,
        pagination::{PageToken, generate_pagination},
    };

    #[test]
    fn shows_all_pages_at_or_below_threshold() {
        for total_pages in 1..=7 {
            for current_page in 1..=total_pages {
                let want: Vec<PageToken> = (1..=total_pages).map(PageToken::Page).collect();

                let got = generate_pagination(current_page, total_pages).unwrap();

                assert_eq!(want, got);
            }
        }
    }

    #[test]
    fn shows_window_at_start() {
        let want = [
            PageToken::Page(1),
            PageToken::Page(2),
            PageToken::Page(3),
            PageToken::Ellipsis,
            PageToken::Page(9),
            PageToken::Page(10),
        ];

        let got = generate_pagination(1, 10).unwrap();

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn shows_window_in_middle() {
        let want = [
            PageToken::Page(1),
            PageToken::Ellipsis,
            PageToken::Page(4),
            PageToken::Page(5),
            PageToken::Page(6),
            PageToken::Ellipsis,
            PageToken::Page(10),
        ];

        let got = generate_pagination(5, 10).unwrap();

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn shows_window_at_end() {
        let want = [
            PageToken::Page(1),
            PageToken::Page(2),
            PageToken::Ellipsis,
            PageToken::Page(8),
            PageToken::Page(9),
            PageToken::Page(10),
        ];

        let got = generate_pagination(9, 10).unwrap();

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn start_branch_covers_first_three_pages() {
        for current_page in 1..=3 {
            let got = generate_pagination(current_page, 10).unwrap();

            assert_eq!(got[0], PageToken::Page(1));
            assert_eq!(got[3], PageToken::Ellipsis);
            assert_eq!(got.len(), 6);
        }
    }

    #[test]
    fn middle_window_with_eight_pages_has_two_ellipses() {
        // The smallest case where the middle branch fires. The two
        // ellipses around the three-page neighbour window are intended.
        let want = [
            PageToken::Page(1),
            PageToken::Ellipsis,
            PageToken::Page(3),
            PageToken::Page(4),
            PageToken::Page(5),
            PageToken::Ellipsis,
            PageToken::Page(8),
        ];

        let got = generate_pagination(4, 8).unwrap();

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn window_length_is_fixed_above_threshold() {
        for total_pages in 8..=40 {
            for current_page in 1..=total_pages {
                let got = generate_pagination(current_page, total_pages).unwrap();

                let is_middle = current_page > 3 && current_page < total_pages - 2;
                let want_len = if is_middle { 7 } else { 6 };

                assert_eq!(
                    got.len(),
                    want_len,
                    "unexpected window length for page {current_page} of {total_pages}"
                );
            }
        }
    }

    #[test]
    fn zero_current_page_is_an_error() {
        let got = generate_pagination(0, 10);

        assert_eq!(got, Err(Error::InvalidPageNumber(0, 10)));
    }

    #[test]
    fn zero_total_pages_is_an_error() {
        let got = generate_pagination(1, 0);

        assert_eq!(got, Err(Error::InvalidPageNumber(1, 0)));
    }
}

#[cfg(test)]
mod pagination_nav_tests {
    use scraper::{Html, Selector};

    use super::pagination_nav;

    fn page_url(page: u64) -> String {
        format!("/invoices?page={page}")
    }

    #[test]
    fn current_page_is_not_a_link() {
        let markup = pagination_nav(2, 3, &page_url).unwrap();

        let html = Html::parse_fragment(&markup.into_string());
        let current = Selector::parse("span[aria-current='page']").unwrap();
        let texts: Vec<String> = html
            .select(&current)
            .map(|element| element.text().collect())
            .collect();

        assert_eq!(texts, ["2"]);
    }

    #[test]
    fn first_page_has_no_previous_link() {
        let markup = pagination_nav(1, 3, &page_url).unwrap();

        let html = Html::parse_fragment(&markup.into_string());
        let prev = Selector::parse("a[rel='prev']").unwrap();
        let next = Selector::parse("a[rel='next']").unwrap();

        assert_eq!(html.select(&prev).count(), 0);
        assert_eq!(html.select(&next).count(), 1);
    }

    #[test]
    fn last_page_has_no_next_link() {
        let markup = pagination_nav(3, 3, &page_url).unwrap();

        let html = Html::parse_fragment(&markup.into_string());
        let prev = Selector::parse("a[rel='prev']").unwrap();
        let next = Selector::parse("a[rel='next']").unwrap();

        assert_eq!(html.select(&prev).count(), 1);
        assert_eq!(html.select(&next).count(), 0);
    }

    #[test]
    fn page_links_use_the_url_builder() {
        let markup = pagination_nav(1, 3, &page_url).unwrap();

        let html = Html::parse_fragment(&markup.into_string());
        let selector = Selector::parse("a").unwrap();
        let hrefs: Vec<&str> = html
            .select(&selector)
            .filter_map(|element| element.value().attr("href"))
            .collect();

        assert!(hrefs.contains(&"/invoices?page=2"));
        assert!(hrefs.contains(&"/invoices?page=3"));
    }
}
