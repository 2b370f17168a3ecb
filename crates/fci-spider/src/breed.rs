//! Breed detail pages.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::NaiveDate;
use fci_crawler::Page;
use lazy_static::lazy_static;
use select::document::Document;
use select::node::Node;
use select::predicate::{Class, Name, Predicate};
use url::Url;

use crate::error::{Result, SpiderError};
use crate::fields::{self, resolve_link};
use crate::html;
use crate::labels::{self, UnsupportedValue};
use crate::model::{
    Breed, BreedStatus, EducationResource, Group, Language, Publication, Section, SubSection,
    SubVariety, Variety, WorkingTrial,
};

/// Placeholder of the publication date column when nothing was published.
const NO_PUBLICATION: &str = "-";

/// Marker of the CACIB columns.
const CACIB_MARK: &str = "*";

/// Rows of the attribute table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Section,
    SubSection,
    ProvisionalAcceptance,
    OfficialLanguage,
    StandardPublication,
    Status,
    OriginCountries,
    WorkingTrial,
    PatronageCountries,
    DefinitiveAcceptance,
    DevelopmentCountries,
}

lazy_static! {
    static ref FIELDS: HashMap<&'static str, Field> = HashMap::from([
        ("Section", Field::Section),
        ("Subsection", Field::SubSection),
        (
            "Date of acceptance on a provisional basis by the FCI",
            Field::ProvisionalAcceptance
        ),
        ("Official authentic language", Field::OfficialLanguage),
        (
            "Date of publication of the official valid standard",
            Field::StandardPublication
        ),
        ("Breed status", Field::Status),
        ("Country of origin of the breed", Field::OriginCountries),
        ("Working trial", Field::WorkingTrial),
        ("Country of patronage of the breed", Field::PatronageCountries),
        (
            "Date of acceptance on a definitive basis by the FCI",
            Field::DefinitiveAcceptance
        ),
        ("Country of development of the breed", Field::DevelopmentCountries),
    ]);
}

/// Extracts a breed from its detail page.
///
/// `groups` and `sections` are the current taxonomy, every reference of the
/// page must resolve against them.
pub fn extract_breed(
    page: &Page,
    base_uri: &str,
    groups: &[Arc<Group>],
    sections: &[Arc<Section>],
) -> Result<Breed> {
    let document = Document::from(page.body.as_str());
    let breed_page = BreedPage {
        document: &document,
        uri: &page.url,
        base_uri,
    };

    let (official_name, code) = breed_page.identity()?;
    let group = breed_page.group(groups)?;
    let (official_name_translations, publications) = breed_page.translations_and_publications()?;
    let attributes = breed_page.attributes(sections)?;
    let varieties = breed_page.varieties()?;
    let images = breed_page.images()?;
    let education_resources = breed_page.education_resources()?;

    let section = attributes.section.ok_or_else(|| breed_page.missing("Section"))?;
    let status = attributes
        .status
        .ok_or_else(|| breed_page.missing("Breed status"))?;
    let working_trial = attributes
        .working_trial
        .ok_or_else(|| breed_page.missing("Working trial"))?;
    let official_language = attributes
        .official_language
        .ok_or_else(|| breed_page.missing("Official authentic language"))?;

    log::debug!("Extracted breed {code} ({official_name}) from {}", page.url);

    Ok(Breed {
        code,
        official_name,
        official_language,
        detail_page_uri: page.url.clone(),
        group,
        section,
        sub_section: attributes.sub_section,
        status,
        working_trial,
        origin_countries: attributes.origin_countries,
        patronage_countries: attributes.patronage_countries,
        development_countries: attributes.development_countries,
        provisional_acceptance_date: attributes.provisional_acceptance_date,
        definitive_acceptance_date: attributes.definitive_acceptance_date,
        standard_publication_date: attributes.standard_publication_date,
        official_name_translations,
        publications,
        cacib: false,
        varieties,
        images,
        education_resources,
    })
}

/// Values of the attribute table seen so far.
#[derive(Debug, Default)]
struct Attributes {
    section: Option<Arc<Section>>,
    sub_section: Option<SubSection>,
    provisional_acceptance_date: Option<NaiveDate>,
    official_language: Option<Language>,
    standard_publication_date: Option<NaiveDate>,
    status: Option<BreedStatus>,
    origin_countries: Vec<String>,
    working_trial: Option<WorkingTrial>,
    patronage_countries: Vec<String>,
    definitive_acceptance_date: Option<NaiveDate>,
    development_countries: Vec<String>,
}

/// Accumulates varieties, sub-varieties go to the last variety pushed.
#[derive(Debug, Default)]
struct VarietiesBuilder {
    varieties: Vec<Variety>,
}

impl VarietiesBuilder {
    fn push_variety(&mut self, variety: Variety) {
        self.varieties.push(variety);
    }

    /// Returns the sub-varieties back when there is no variety to attach them to.
    fn attach_sub_varieties(
        &mut self,
        sub_varieties: Vec<SubVariety>,
    ) -> std::result::Result<(), Vec<SubVariety>> {
        match self.varieties.last_mut() {
            Some(variety) => {
                variety.sub_varieties.extend(sub_varieties);
                Ok(())
            }
            None => Err(sub_varieties),
        }
    }

    fn build(self) -> Vec<Variety> {
        self.varieties
    }
}

/// A row of the varieties table.
enum VarietyRow<'a> {
    Variety(Node<'a>),
    /// Carries the `div.sousvarietes` marker
    SubVarieties(Node<'a>),
}

impl<'a> From<Node<'a>> for VarietyRow<'a> {
    fn from(row: Node<'a>) -> Self {
        match row.find(Name("div").and(Class("sousvarietes"))).next() {
            Some(marker) => Self::SubVarieties(marker),
            None => Self::Variety(row),
        }
    }
}

struct BreedPage<'a> {
    document: &'a Document,
    uri: &'a str,
    base_uri: &'a str,
}

impl<'a> BreedPage<'a> {
    fn structure(&self, what: impl Into<String>) -> SpiderError {
        SpiderError::structure(self.uri, what)
    }

    fn missing(&self, label: &str) -> SpiderError {
        self.structure(format!("missing '{label}'"))
    }

    fn unsupported(&self, source: UnsupportedValue) -> SpiderError {
        SpiderError::unsupported(self.uri, source)
    }

    fn date(&self, field: &str, value: &str) -> Result<NaiveDate> {
        fields::parse_date(value).map_err(|source| SpiderError::InvalidDate {
            uri: self.uri.to_string(),
            field: field.to_string(),
            value: value.to_string(),
            source,
        })
    }

    /// `<h2 class="nom"><span>NAME</span><span>CODE</span></h2>`
    fn identity(&self) -> Result<(String, u32)> {
        let heading = self
            .document
            .find(Name("h2").and(Class("nom")))
            .next()
            .ok_or_else(|| self.missing("breed heading"))?;

        let spans: Vec<_> = heading.find(Name("span")).collect();
        let (name, code) = match spans.as_slice() {
            [name, code, ..] => (html::text(name), html::text(code)),
            _ => return Err(self.structure("breed heading without name and code")),
        };

        let code = code
            .parse()
            .map_err(|_| self.structure(format!("non numeric breed code '{code}'")))?;

        Ok((name, code))
    }

    /// `<span>Group :</span><a>n°1 Sheepdogs and Cattledogs</a>`
    fn group(&self, groups: &[Arc<Group>]) -> Result<Arc<Group>> {
        let label = self
            .document
            .find(Name("span"))
            .find(|span| html::text(span) == "Group :")
            .ok_or_else(|| self.missing("Group"))?;

        let value = label
            .parent()
            .and_then(|parent| html::first_child(&parent, "a"))
            .map(|anchor| html::text(&anchor))
            .ok_or_else(|| self.missing("Group link"))?;

        let digits: String = value
            .replace("n°", "")
            .trim_start()
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        let index: u32 = digits
            .parse()
            .map_err(|_| self.structure(format!("invalid group reference '{value}'")))?;

        groups
            .iter()
            .find(|group| group.index == index)
            .cloned()
            .ok_or_else(|| SpiderError::integrity(self.uri, format!("unknown group {index}")))
    }

    /// Both come from the first `table.racesgridview`, one row per language.
    fn translations_and_publications(
        &self,
    ) -> Result<(BTreeMap<Language, String>, Vec<Publication>)> {
        let table = self
            .document
            .find(Name("table").and(Class("racesgridview")))
            .next()
            .ok_or_else(|| self.missing("translations table"))?;

        let mut translations = BTreeMap::new();
        let mut publications = vec![];

        for row in html::rows(&table).into_iter().skip(1) {
            let cells = html::cells(&row);

            let language = cells
                .first()
                .map(html::text)
                .ok_or_else(|| self.structure("translation row without language"))?;
            let language = labels::parse_language(&language).map_err(|e| self.unsupported(e))?;

            let name = cells
                .get(1)
                .and_then(html::span_text)
                .ok_or_else(|| self.structure(format!("no translation in {language}")))?;
            translations.insert(language, name);

            let date = cells
                .get(2)
                .and_then(html::span_text)
                .ok_or_else(|| self.structure(format!("no publication date in {language}")))?;
            if date == NO_PUBLICATION {
                continue;
            }
            let date = self.date("publication date", &date)?;

            let href = cells
                .get(3)
                .and_then(|cell| html::first_child(cell, "a"))
                .and_then(|anchor| anchor.attr("href"))
                .ok_or_else(|| self.structure(format!("no publication link in {language}")))?;

            publications.push(Publication {
                language,
                date,
                uri: resolve_link(self.base_uri, href),
            });
        }

        Ok((translations, publications))
    }

    /// Label/value rows of every `table.racetable`.
    fn attributes(&self, sections: &[Arc<Section>]) -> Result<Attributes> {
        let mut attributes = Attributes::default();

        for table in self.document.find(Name("table").and(Class("racetable"))) {
            for row in html::rows(&table) {
                let cells = html::cells(&row);
                let label = cells
                    .first()
                    .and_then(html::span_text)
                    .ok_or_else(|| self.structure("attribute row without label"))?;
                let value = cells
                    .get(1)
                    .and_then(html::span_text)
                    .ok_or_else(|| self.structure(format!("no value for '{label}'")))?;

                let field = FIELDS
                    .get(label.as_str())
                    .copied()
                    .ok_or_else(|| self.unsupported(UnsupportedValue::new("breed field", &label)))?;

                self.apply_attribute(&mut attributes, field, &label, &value, sections)?;
            }
        }

        Ok(attributes)
    }

    fn apply_attribute(
        &self,
        attributes: &mut Attributes,
        field: Field,
        label: &str,
        value: &str,
        sections: &[Arc<Section>],
    ) -> Result<()> {
        match field {
            Field::Section => attributes.section = Some(self.section(value, sections)?),
            Field::SubSection => {
                let section = attributes
                    .section
                    .as_ref()
                    .ok_or_else(|| self.structure("'Subsection' listed before 'Section'"))?;
                let sub_section = section
                    .sub_sections
                    .iter()
                    .find(|sub_section| sub_section.official_name == value)
                    .cloned()
                    .ok_or_else(|| {
                        SpiderError::integrity(
                            self.uri,
                            format!(
                                "unknown sub-section '{value}' in section '{}'",
                                section.official_name
                            ),
                        )
                    })?;
                attributes.sub_section = Some(sub_section);
            }
            Field::ProvisionalAcceptance => {
                attributes.provisional_acceptance_date = Some(self.date(label, value)?)
            }
            Field::OfficialLanguage => {
                attributes.official_language =
                    Some(labels::parse_language(value).map_err(|e| self.unsupported(e))?)
            }
            Field::StandardPublication => {
                attributes.standard_publication_date = Some(self.date(label, value)?)
            }
            Field::Status => {
                attributes.status =
                    Some(fields::parse_status(value).map_err(|e| self.unsupported(e))?)
            }
            Field::OriginCountries => attributes.origin_countries = fields::split_countries(value),
            Field::WorkingTrial => {
                attributes.working_trial =
                    Some(fields::parse_working_trial(value).map_err(|e| self.unsupported(e))?)
            }
            Field::PatronageCountries => {
                attributes.patronage_countries = fields::split_countries(value)
            }
            Field::DefinitiveAcceptance => {
                attributes.definitive_acceptance_date = Some(self.date(label, value)?)
            }
            Field::DevelopmentCountries => {
                attributes.development_countries = fields::split_countries(value)
            }
        }
        Ok(())
    }

    /// Sections are looked up by name across all groups.
    fn section(&self, name: &str, sections: &[Arc<Section>]) -> Result<Arc<Section>> {
        let mut matching = sections.iter().filter(|s| s.official_name == name);
        let section = matching.next().cloned().ok_or_else(|| {
            SpiderError::integrity(self.uri, format!("unknown section '{name}'"))
        })?;
        if matching.next().is_some() {
            log::warn!(
                "Section name '{name}' is ambiguous, using the one of group {} for {}",
                section.group.index,
                self.uri
            );
        }
        Ok(section)
    }

    /// Optional `div.varietes` table.
    fn varieties(&self) -> Result<Vec<Variety>> {
        let container = match self
            .document
            .find(Name("div").and(Class("varietes")))
            .next()
        {
            Some(container) => container,
            None => return Ok(vec![]),
        };
        let table = container
            .find(Name("table"))
            .next()
            .ok_or_else(|| self.missing("varieties table"))?;

        let mut builder = VarietiesBuilder::default();
        for row in html::rows(&table).into_iter().skip(1) {
            match VarietyRow::from(row) {
                VarietyRow::Variety(row) => builder.push_variety(self.variety(&row)?),
                VarietyRow::SubVarieties(marker) => {
                    let sub_varieties = self.sub_varieties(&marker)?;
                    builder
                        .attach_sub_varieties(sub_varieties)
                        .map_err(|_| self.structure("sub-varieties without variety"))?;
                }
            }
        }

        Ok(builder.build())
    }

    /// `<td><span>A) Name</span></td><td><span>*</span></td>`
    fn variety(&self, row: &Node) -> Result<Variety> {
        let cells = html::cells(row);
        let label = cells
            .first()
            .and_then(html::span_text)
            .ok_or_else(|| self.structure("variety row without label"))?;
        let (letter, name) = label
            .split_once(')')
            .ok_or_else(|| self.structure(format!("invalid variety label '{label}'")))?;

        Ok(Variety {
            index_letter: letter.trim().to_string(),
            official_name: name.trim().to_string(),
            cacib: is_cacib_marked(cells.get(1)),
            sub_varieties: vec![],
        })
    }

    fn sub_varieties(&self, marker: &Node) -> Result<Vec<SubVariety>> {
        marker
            .find(Name("tr"))
            .map(|row| -> Result<SubVariety> {
                let cells = html::cells(&row);
                let names = cells
                    .first()
                    .and_then(|cell| html::first_child(cell, "span"))
                    .map(|span| html::line_broken_texts(&span))
                    .filter(|names| !names.is_empty())
                    .ok_or_else(|| self.structure("sub-variety without name"))?;

                Ok(SubVariety {
                    official_names: names,
                    cacib: is_cacib_marked(cells.get(1)),
                })
            })
            .collect()
    }

    /// The last illustration is the generic anatomy picture, it is dropped.
    fn images(&self) -> Result<Vec<String>> {
        let list = self
            .document
            .find(Name("ul").and(Class("illustrations")))
            .next()
            .ok_or_else(|| self.missing("illustrations"))?;

        let mut items: Vec<_> = list.children().filter(|n| n.is(Name("li"))).collect();
        items.pop();

        items
            .iter()
            .map(|item| {
                item.find(Name("a"))
                    .next()
                    .and_then(|anchor| anchor.attr("href"))
                    .map(|href| resolve_link(self.base_uri, href))
                    .ok_or_else(|| self.structure("illustration without link"))
            })
            .collect()
    }

    /// Optional `ul.education` list.
    fn education_resources(&self) -> Result<Vec<EducationResource>> {
        let list = match self
            .document
            .find(Name("ul").and(Class("education")))
            .next()
        {
            Some(list) => list,
            None => return Ok(vec![]),
        };

        list.children()
            .filter(|n| n.is(Name("li")))
            .map(|item| {
                let href = item
                    .find(Name("a"))
                    .next()
                    .and_then(|anchor| anchor.attr("href"))
                    .ok_or_else(|| self.structure("education resource without link"))?;
                self.education_resource(href)
            })
            .collect()
    }

    /// Embedded players point to the actual file with their `url` parameter.
    fn education_resource(&self, href: &str) -> Result<EducationResource> {
        let mut url = self.parse_url(&resolve_link(self.base_uri, href))?;

        let target = url
            .query_pairs()
            .find(|(key, value)| key == "url" && !value.trim().is_empty())
            .map(|(_, value)| value.into_owned());
        if let Some(target) = target {
            url = self.parse_url(&resolve_link(self.base_uri, &target))?;
        }

        let extension = fields::file_extension(&url)
            .ok_or_else(|| self.structure(format!("education resource {url} without extension")))?;
        let file_type = fields::classify_extension(extension).map_err(|e| self.unsupported(e))?;

        Ok(EducationResource {
            extension: format!(".{extension}"),
            file_type,
            uri: url.to_string(),
        })
    }

    fn parse_url(&self, url: &str) -> Result<Url> {
        Url::parse(url).map_err(|e| self.structure(format!("invalid link '{url}': {e}")))
    }
}

fn is_cacib_marked(cell: Option<&Node>) -> bool {
    cell.and_then(html::span_text).as_deref() == Some(CACIB_MARK)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://fci.be";
    const URI: &str = "http://fci.be/en/nomenclature/BERGER-BELGE-15.html";

    fn taxonomy() -> (Vec<Arc<Group>>, Vec<Arc<Section>>) {
        let group = Arc::new(Group {
            index: 1,
            official_name: String::from("Sheepdogs and Cattledogs (except Swiss Cattledogs)"),
            detail_page_uri: String::from("http://fci.be/en/nomenclature/1.html"),
        });
        let section = Arc::new(Section {
            group: group.clone(),
            index: 1,
            official_name: String::from("Sheepdogs"),
            sub_sections: vec![SubSection {
                index: 1,
                official_name: String::from("Continental"),
            }],
        });
        (vec![group], vec![section])
    }

    fn breed_page(attributes: &str, extra: &str) -> Page {
        Page {
            url: URI.to_string(),
            body: format!(
                r#"<html><body>
                <h2 class="nom"><span>BELGIAN SHEPHERD DOG</span> <span>15</span></h2>
                <div><span>Group :</span> <a href="/en/nomenclature/1.html">n°1 Sheepdogs and Cattledogs</a></div>
                <table class="racesgridview">
                  <tr><th>Language</th><th>Name</th><th>Date</th><th>Standard</th></tr>
                  <tr><td>English</td><td><span>BELGIAN SHEPHERD DOG</span></td>
                      <td><span>11/25/2019</span></td>
                      <td><a href="../Nomenclature/Standards/015g01-en.pdf">PDF</a></td></tr>
                  <tr><td>French</td><td><span>CHIEN DE BERGER BELGE</span></td>
                      <td><span>-</span></td><td></td></tr>
                </table>
                <table class="racetable">{attributes}</table>
                <ul class="illustrations">
                  <li><a href="/Nomenclature/Illustrations/015g01.jpg">1</a></li>
                  <li><a href="/Nomenclature/Illustrations/015g01-2.jpg">2</a></li>
                  <li><a href="/Nomenclature/Illustrations/anatomy.jpg">anatomy</a></li>
                </ul>
                {extra}
                </body></html>"#
            ),
        }
    }

    fn attribute(label: &str, value: &str) -> String {
        format!("<tr><td><span>{label}</span></td><td><span>{value}</span></td></tr>")
    }

    fn base_attributes() -> String {
        [
            attribute("Section", "Sheepdogs"),
            attribute("Subsection", "Continental"),
            attribute("Official authentic language", "French"),
            attribute("Breed status", "Recognized on a definitive basis"),
            attribute("Country of origin of the breed", "Belgium, "),
            attribute(
                "Working trial",
                "Subject to a working trial only for the Nordic countries (Finland, Norway, Sweden)",
            ),
            attribute("Date of acceptance on a definitive basis by the FCI", "9/22/1954"),
        ]
        .concat()
    }

    #[test]
    fn full_breed_page() {
        let (groups, sections) = taxonomy();
        let page = breed_page(&base_attributes(), "");
        let breed = extract_breed(&page, BASE, &groups, &sections).unwrap();

        assert_eq!(breed.code, 15);
        assert_eq!(breed.official_name, "BELGIAN SHEPHERD DOG");
        assert_eq!(breed.detail_page_uri, URI);
        assert!(Arc::ptr_eq(&breed.group, &groups[0]));
        assert!(Arc::ptr_eq(&breed.section, &sections[0]));
        assert_eq!(breed.sub_section.as_ref().unwrap().index, 1);
        assert_eq!(breed.official_language, Language::Fr);
        assert_eq!(breed.status, BreedStatus::Definitive);
        assert_eq!(
            breed.working_trial,
            WorkingTrial::SubjectOnlyForNordicCountries
        );
        assert_eq!(breed.origin_countries, ["Belgium"]);
        assert!(breed.patronage_countries.is_empty());
        assert_eq!(
            breed.definitive_acceptance_date,
            NaiveDate::from_ymd_opt(1954, 9, 22)
        );
        assert_eq!(breed.provisional_acceptance_date, None);
        assert!(!breed.cacib);

        assert_eq!(
            breed.official_name_translations,
            BTreeMap::from([
                (Language::En, String::from("BELGIAN SHEPHERD DOG")),
                (Language::Fr, String::from("CHIEN DE BERGER BELGE")),
            ])
        );
        assert_eq!(
            breed.publications,
            [Publication {
                language: Language::En,
                date: NaiveDate::from_ymd_opt(2019, 11, 25).unwrap(),
                uri: String::from("http://fci.be/Nomenclature/Standards/015g01-en.pdf"),
            }]
        );

        assert_eq!(
            breed.images,
            [
                "http://fci.be/Nomenclature/Illustrations/015g01.jpg",
                "http://fci.be/Nomenclature/Illustrations/015g01-2.jpg"
            ]
        );
        assert!(breed.varieties.is_empty());
        assert!(breed.education_resources.is_empty());
    }

    #[test]
    fn varieties_and_sub_varieties() {
        let (groups, sections) = taxonomy();
        let varieties = r#"
            <div class="varietes"><table>
              <tr><th>Variety</th><th>CACIB</th></tr>
              <tr><td><span>A) Groenendael</span></td><td><span>*</span></td></tr>
              <tr><td colspan="2"><div class="sousvarietes"><table>
                <tr><td><span>Black<br>Black and tan</span></td><td><span>*</span></td></tr>
                <tr><td><span>Fawn</span></td><td></td></tr>
              </table></div></td></tr>
              <tr><td><span>B) Tervueren</span></td><td></td></tr>
            </table></div>"#;
        let page = breed_page(&base_attributes(), varieties);
        let breed = extract_breed(&page, BASE, &groups, &sections).unwrap();

        assert_eq!(
            breed.varieties,
            [
                Variety {
                    index_letter: String::from("A"),
                    official_name: String::from("Groenendael"),
                    cacib: true,
                    sub_varieties: vec![
                        SubVariety {
                            official_names: vec![
                                String::from("Black"),
                                String::from("Black and tan")
                            ],
                            cacib: true,
                        },
                        SubVariety {
                            official_names: vec![String::from("Fawn")],
                            cacib: false,
                        },
                    ],
                },
                Variety {
                    index_letter: String::from("B"),
                    official_name: String::from("Tervueren"),
                    cacib: false,
                    sub_varieties: vec![],
                },
            ]
        );
    }

    #[test]
    fn sub_varieties_need_a_variety() {
        let (groups, sections) = taxonomy();
        let varieties = r#"
            <div class="varietes"><table>
              <tr><th>Variety</th><th>CACIB</th></tr>
              <tr><td><div class="sousvarietes"><table>
                <tr><td><span>Black</span></td><td></td></tr>
              </table></div></td></tr>
            </table></div>"#;
        let page = breed_page(&base_attributes(), varieties);
        assert!(matches!(
            extract_breed(&page, BASE, &groups, &sections),
            Err(SpiderError::Structure { .. })
        ));
    }

    #[test]
    fn education_resources_follow_player_links() {
        let (groups, sections) = taxonomy();
        let education = r#"
            <ul class="education">
              <li><a href="../Nomenclature/Education/015-presentation.pptx">Presentation</a></li>
              <li><a href="../player.aspx?url=/Nomenclature/Education/015.flv">Video</a></li>
            </ul>"#;
        let page = breed_page(&base_attributes(), education);
        let breed = extract_breed(&page, BASE, &groups, &sections).unwrap();

        assert_eq!(
            breed.education_resources,
            [
                EducationResource {
                    extension: String::from(".pptx"),
                    file_type: crate::model::FileType::PowerPoint,
                    uri: String::from(
                        "http://fci.be/Nomenclature/Education/015-presentation.pptx"
                    ),
                },
                EducationResource {
                    extension: String::from(".flv"),
                    file_type: crate::model::FileType::FlashVideo,
                    uri: String::from("http://fci.be/Nomenclature/Education/015.flv"),
                },
            ]
        );
    }

    #[test]
    fn unknown_education_extension_is_unsupported() {
        let (groups, sections) = taxonomy();
        let education = r#"<ul class="education"><li><a href="../doc/015.docx">Doc</a></li></ul>"#;
        let page = breed_page(&base_attributes(), education);
        match extract_breed(&page, BASE, &groups, &sections) {
            Err(SpiderError::Unsupported { uri, source }) => {
                assert_eq!(uri, URI);
                assert_eq!(source.field, "file extension");
                assert_eq!(source.value, "docx");
            }
            other => panic!("Unexpected extraction result: {other:?}"),
        }
    }

    #[test]
    fn unknown_attribute_label_is_unsupported() {
        let (groups, sections) = taxonomy();
        let attributes = base_attributes() + &attribute("Colour", "Black");
        let page = breed_page(&attributes, "");
        match extract_breed(&page, BASE, &groups, &sections) {
            Err(SpiderError::Unsupported { source, .. }) => {
                assert_eq!(source.field, "breed field");
                assert_eq!(source.value, "Colour");
            }
            other => panic!("Unexpected extraction result: {other:?}"),
        }
    }

    #[test]
    fn unknown_status_is_unsupported() {
        let (groups, sections) = taxonomy();
        let attributes = base_attributes().replace(
            "Recognized on a definitive basis",
            "Recognized on a temporary basis",
        );
        let page = breed_page(&attributes, "");
        assert!(matches!(
            extract_breed(&page, BASE, &groups, &sections),
            Err(SpiderError::Unsupported { .. })
        ));
    }

    #[test]
    fn unknown_section_is_inconsistent() {
        let (groups, sections) = taxonomy();
        let attributes = base_attributes().replace(
            &attribute("Section", "Sheepdogs"),
            &attribute("Section", "Herding dogs"),
        );
        let page = breed_page(&attributes, "");
        assert!(matches!(
            extract_breed(&page, BASE, &groups, &sections),
            Err(SpiderError::Integrity { .. })
        ));
    }

    #[test]
    fn unknown_sub_section_is_inconsistent() {
        let (groups, sections) = taxonomy();
        let attributes = base_attributes().replace(
            &attribute("Subsection", "Continental"),
            &attribute("Subsection", "Insular"),
        );
        let page = breed_page(&attributes, "");
        match extract_breed(&page, BASE, &groups, &sections) {
            Err(SpiderError::Integrity { uri, what }) => {
                assert_eq!(uri, URI);
                assert!(what.contains("Insular"));
            }
            other => panic!("Unexpected extraction result: {other:?}"),
        }
    }

    #[test]
    fn sub_section_before_section_is_rejected() {
        let (groups, sections) = taxonomy();
        let attributes = attribute("Subsection", "Continental") + &base_attributes();
        let page = breed_page(&attributes, "");
        assert!(matches!(
            extract_breed(&page, BASE, &groups, &sections),
            Err(SpiderError::Structure { .. })
        ));
    }

    #[test]
    fn unknown_group_is_inconsistent() {
        let (_, sections) = taxonomy();
        let page = breed_page(&base_attributes(), "");
        assert!(matches!(
            extract_breed(&page, BASE, &[], &sections),
            Err(SpiderError::Integrity { .. })
        ));
    }

    #[test]
    fn non_numeric_code_is_rejected() {
        let (groups, sections) = taxonomy();
        let mut page = breed_page(&base_attributes(), "");
        page.body = page.body.replace("<span>15</span>", "<span>XV</span>");
        assert!(matches!(
            extract_breed(&page, BASE, &groups, &sections),
            Err(SpiderError::Structure { .. })
        ));
    }

    #[test]
    fn malformed_date_is_reported_with_its_field() {
        let (groups, sections) = taxonomy();
        let attributes = base_attributes().replace("9/22/1954", "1954-09-22");
        let page = breed_page(&attributes, "");
        match extract_breed(&page, BASE, &groups, &sections) {
            Err(SpiderError::InvalidDate { field, value, .. }) => {
                assert_eq!(field, "Date of acceptance on a definitive basis by the FCI");
                assert_eq!(value, "1954-09-22");
            }
            other => panic!("Unexpected extraction result: {other:?}"),
        }
    }

    #[test]
    fn status_is_required() {
        let (groups, sections) = taxonomy();
        let attributes = base_attributes().replace(
            &attribute("Breed status", "Recognized on a definitive basis"),
            "",
        );
        let page = breed_page(&attributes, "");
        assert!(matches!(
            extract_breed(&page, BASE, &groups, &sections),
            Err(SpiderError::Structure { .. })
        ));
    }
}
