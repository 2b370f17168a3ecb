//! CACIB eligibility, only listed on the group detail pages.

use std::sync::Arc;

use fci_crawler::{Fetcher, Page};
use futures::{stream, StreamExt, TryStreamExt};
use select::document::Document;
use select::predicate::{Class, Name, Predicate};

use crate::error::{Result, SpiderError};
use crate::html;
use crate::model::{Breed, Group};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacibMark {
    pub code: u32,
    pub cacib: bool,
}

/// Reads one mark per `td.race` cell of a group page.
pub fn extract_cacib_marks(page: &Page) -> Result<Vec<CacibMark>> {
    let uri = page.url.as_str();
    let document = Document::from(page.body.as_str());

    document
        .find(Name("td").and(Class("race")))
        .map(|cell| -> Result<CacibMark> {
            let code = html::first_child(&cell, "a")
                .and_then(|anchor| anchor.attr("name").map(str::trim))
                .filter(|name| !name.is_empty())
                .ok_or_else(|| SpiderError::structure(uri, "breed row without code anchor"))?;
            let code = code.parse().map_err(|_| {
                SpiderError::structure(uri, format!("non numeric breed code '{code}'"))
            })?;

            let cacib = cell
                .parent()
                .and_then(|row| row.find(Name("td").and(Class("racecabib"))).next())
                .and_then(|cell| html::span_text(&cell))
                .map_or(false, |mark| mark == "*");

            Ok(CacibMark { code, cacib })
        })
        .collect()
}

/// Sets the CACIB flag of the breeds listed in `marks`.
///
/// `uri` is the page the marks come from, a mark for a breed that isn't in
/// `breeds` is an integrity error.
pub fn apply_cacib_marks(breeds: &mut [Breed], marks: &[CacibMark], uri: &str) -> Result<()> {
    for mark in marks {
        let breed = breeds
            .iter_mut()
            .find(|breed| breed.code == mark.code)
            .ok_or_else(|| {
                SpiderError::integrity(uri, format!("CACIB mark for unknown breed {}", mark.code))
            })?;
        breed.cacib = mark.cacib;
    }
    Ok(())
}

/// Downloads every group page and applies its marks, in group order.
pub async fn enrich<F>(
    fetcher: &F,
    mut breeds: Vec<Breed>,
    groups: &[Arc<Group>],
    concurrency: usize,
) -> Result<Vec<Breed>>
where
    F: Fetcher + ?Sized,
{
    let pages: Vec<(String, Vec<CacibMark>)> = stream::iter(groups)
        .map(|group| async move {
            let page = fetcher.fetch(&group.detail_page_uri).await?;
            let marks = extract_cacib_marks(&page)?;
            Ok::<_, SpiderError>((page.url, marks))
        })
        .buffered(concurrency.max(1))
        .try_collect()
        .await?;

    for (uri, marks) in &pages {
        apply_cacib_marks(&mut breeds, marks, uri)?;
    }

    let eligible = breeds.iter().filter(|breed| breed.cacib).count();
    log::debug!("{eligible} of {} breeds are CACIB eligible", breeds.len());
    Ok(breeds)
}
