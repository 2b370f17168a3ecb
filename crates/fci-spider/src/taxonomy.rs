//! Groups, sections and sub-sections of the nomenclature.

use std::sync::Arc;

use fci_crawler::Page;
use select::document::Document;
use select::predicate::{Class, Name, Predicate};

use crate::error::{Result, SpiderError};
use crate::fields::resolve_link;
use crate::html;
use crate::model::{Group, Section, SubSection};

/// Reads the groups listing page, groups are kept in document order.
pub fn extract_groups(page: &Page, base_uri: &str) -> Result<Vec<Group>> {
    let uri = page.url.as_str();
    let document = Document::from(page.body.as_str());

    let mut groups: Vec<Group> = vec![];
    for div in document.find(Name("div").and(Class("group"))) {
        let anchor = div
            .find(Name("a"))
            .next()
            .ok_or_else(|| SpiderError::structure(uri, "group without anchor"))?;

        let label = html::text(&anchor);
        let index = parse_group_label(&label)
            .ok_or_else(|| SpiderError::structure(uri, format!("invalid group label '{label}'")))?;

        let official_name = div
            .parent()
            .and_then(|parent| parent.find(Name("span")).next())
            .map(|span| html::text(&span))
            .ok_or_else(|| SpiderError::structure(uri, format!("group {index} without name")))?;

        let href = anchor
            .attr("href")
            .ok_or_else(|| SpiderError::structure(uri, format!("group {index} without link")))?;

        if groups.iter().any(|group| group.index == index) {
            return Err(SpiderError::integrity(
                uri,
                format!("group index {index} listed twice"),
            ));
        }

        groups.push(Group {
            index,
            official_name,
            detail_page_uri: resolve_link(base_uri, href),
        });
    }

    if groups.is_empty() {
        return Err(SpiderError::structure(uri, "no breed group listed"));
    }

    log::info!("Extracted {} groups from {uri}", groups.len());
    Ok(groups)
}

/// Reads the sections, and their sub-sections, of a group detail page.
pub fn extract_sections(page: &Page, group: &Arc<Group>) -> Result<Vec<Section>> {
    let uri = page.url.as_str();
    let document = Document::from(page.body.as_str());

    let mut sections = vec![];
    for item in document.find(Name("ul").and(Class("sections")).child(Name("li"))) {
        let span = item
            .find(Name("span"))
            .next()
            .ok_or_else(|| SpiderError::structure(uri, "section without label"))?;

        let code = span
            .find(Name("b"))
            .next()
            .map(|b| html::text(&b))
            .ok_or_else(|| SpiderError::structure(uri, "section without code"))?;
        let index = parse_section_label(&code)
            .ok_or_else(|| SpiderError::structure(uri, format!("invalid section code '{code}'")))?;

        let label = html::text(&span);
        let official_name = label
            .split_once(':')
            .map(|(_, name)| name.trim().to_string())
            .ok_or_else(|| {
                SpiderError::structure(uri, format!("invalid section label '{label}'"))
            })?;

        let mut sub_sections = vec![];
        for sub_item in item.find(Name("ul").and(Class("soussections")).child(Name("li"))) {
            let label = sub_item
                .find(Name("span"))
                .next()
                .map(|span| html::text(&span))
                .ok_or_else(|| {
                    SpiderError::structure(uri, format!("sub-section of {index} without label"))
                })?;
            let sub_index = parse_sub_section_index(&label).ok_or_else(|| {
                SpiderError::structure(uri, format!("invalid sub-section label '{label}'"))
            })?;
            sub_sections.push(SubSection {
                index: sub_index,
                official_name: label,
            });
        }

        for sub_section in &mut sub_sections {
            sub_section.official_name =
                strip_index_prefix(&sub_section.official_name, sub_section.index);
        }

        sections.push(Section {
            group: group.clone(),
            index,
            official_name,
            sub_sections,
        });
    }

    if sections.is_empty() {
        return Err(SpiderError::structure(
            uri,
            format!("no section listed for group {}", group.index),
        ));
    }

    log::debug!(
        "Extracted {} sections of group {} from {uri}",
        sections.len(),
        group.index
    );
    Ok(sections)
}

/// Links to breed detail pages (`a.nom`), in document order.
pub fn extract_breed_links(page: &Page, base_uri: &str) -> Result<Vec<String>> {
    let uri = page.url.as_str();
    let document = Document::from(page.body.as_str());

    document
        .find(Name("a").and(Class("nom")))
        .map(|anchor| {
            anchor
                .attr("href")
                .map(|href| resolve_link(base_uri, href))
                .ok_or_else(|| {
                    SpiderError::structure(
                        uri,
                        format!("breed link '{}' without target", html::text(&anchor)),
                    )
                })
        })
        .collect()
}

/// `Group 1` -> 1
fn parse_group_label(label: &str) -> Option<u32> {
    label
        .to_uppercase()
        .replace("GROUP", "")
        .trim()
        .parse()
        .ok()
        .filter(|index| *index > 0)
}

/// `Section 1 :` -> 1
fn parse_section_label(code: &str) -> Option<u32> {
    code.to_uppercase()
        .replace("SECTION", "")
        .replace(':', "")
        .trim()
        .parse()
        .ok()
}

/// Dot separated numbers of a token such as `1.2` or `2.`
fn numeric_components(token: &str) -> Option<Vec<u32>> {
    token
        .trim_end_matches('.')
        .split('.')
        .map(|part| part.parse().ok())
        .collect()
}

/// `1.2 Name` -> 2, `2. Name` -> 2
fn parse_sub_section_index(label: &str) -> Option<u32> {
    let token = label.split_whitespace().next()?;
    numeric_components(token)?.last().copied()
}

/// Drops a leading `<index>.` token, with or without the enclosing numerals.
fn strip_index_prefix(name: &str, index: u32) -> String {
    match name.split_once(char::is_whitespace) {
        Some((token, rest))
            if numeric_components(token)
                .and_then(|parts| parts.last().copied())
                .map_or(false, |last| last == index) =>
        {
            rest.trim().to_string()
        }
        _ => name.to_string(),
    }
}
