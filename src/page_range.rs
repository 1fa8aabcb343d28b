use crate::error::{Error, Result};

/// Resolve a page-range expression like "1,3,5-8,10-end" into the concrete
/// ascending, deduplicated page numbers it denotes.
///
/// Tokens are comma-separated: either a single page number or a dashed
/// `lo-hi` pair, where `hi` may be the end-of-document sentinel ("end", or
/// "z" as qpdf spells it). The sentinel needs `page_count`; using it without
/// one is an error, never a partial result.
///
/// When `page_count` is known, pages beyond it are silently dropped. Pages
/// below 1 are not filtered; without a page count nothing is filtered at all
/// and out-of-range numbers pass through to the caller.
pub fn resolve(expression: &str, page_count: Option<u32>) -> Result<Vec<u32>> {
    let mut pages = Vec::new();
    for token in expression.split(',') {
        expand_token(token.trim(), page_count, &mut pages)?;
    }

    if let Some(count) = page_count {
        pages.retain(|&page| page <= count);
    }

    pages.sort_unstable();
    pages.dedup();
    Ok(pages)
}

/// Render resolved pages back into the comma-joined form the engine accepts.
pub fn render(pages: &[u32]) -> String {
    let pages: Vec<String> = pages.iter().map(u32::to_string).collect();
    pages.join(",")
}

/// Ascending pages of a `page_count`-page document that are NOT in `pages`.
///
/// `pages` must be sorted ascending (which [`resolve`] guarantees).
pub fn complement(pages: &[u32], page_count: u32) -> Vec<u32> {
    (1..=page_count)
        .filter(|page| pages.binary_search(page).is_err())
        .collect()
}

fn expand_token(token: &str, page_count: Option<u32>, out: &mut Vec<u32>) -> Result<()> {
    let Some((lo, hi)) = token.split_once('-') else {
        out.push(parse_page(token)?);
        return Ok(());
    };

    let lo = parse_page(lo)?;
    let hi = if is_end_sentinel(hi) {
        page_count.ok_or(Error::MissingPageCount)?
    } else {
        parse_page(hi)?
    };

    if lo <= hi {
        out.extend(lo..=hi);
    } else {
        // A descending pair like "8-4" still covers the whole inclusive
        // range; it is generated high-to-low before normalization.
        out.extend((hi..=lo).rev());
    }
    Ok(())
}

fn is_end_sentinel(s: &str) -> bool {
    let s = s.trim();
    s.eq_ignore_ascii_case("end") || s.eq_ignore_ascii_case("z")
}

fn parse_page(s: &str) -> Result<u32> {
    let s = s.trim();
    s.parse::<u32>()
        .map_err(|_| Error::RangeSyntax(s.to_string()))
}
