use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use fci_spider::fci_crawler::{FetchError, Fetcher, Page};
use fci_spider::{FciSpider, SpiderConfig};

pub const GROUPS_URI: &str = "http://fci.be/en/Nomenclature/";
pub const PROVISIONAL_URI: &str = "http://fci.be/en/nomenclature/provisoire.aspx";
pub const GROUP_1_URI: &str = "http://fci.be/en/nomenclature/1.html";
pub const GROUP_2_URI: &str = "http://fci.be/en/nomenclature/2.html";

/// Serves pages from memory and counts downloads per URL.
#[derive(Debug, Default)]
pub struct FixtureFetcher {
    pages: HashMap<String, String>,
    hits: HashMap<String, AtomicUsize>,
}

impl FixtureFetcher {
    pub fn with_page(mut self, url: &str, body: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), body.into());
        self.hits.insert(url.to_string(), AtomicUsize::new(0));
        self
    }

    pub fn without_page(mut self, url: &str) -> Self {
        self.pages.remove(url);
        self
    }

    pub fn hits(&self, url: &str) -> usize {
        self.hits
            .get(url)
            .map_or(0, |hits| hits.load(Ordering::SeqCst))
    }
}

#[async_trait]
impl Fetcher for FixtureFetcher {
    async fn fetch(&self, url: &str) -> Result<Page, FetchError> {
        if let Some(hits) = self.hits.get(url) {
            hits.fetch_add(1, Ordering::SeqCst);
        }
        match self.pages.get(url) {
            Some(body) => Ok(Page {
                url: url.to_string(),
                body: body.clone(),
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

pub fn breed_uri(code: u32) -> String {
    format!("http://fci.be/en/nomenclature/breed-{code}.html")
}

pub fn groups_page() -> String {
    r#"<html><body><ul>
         <li><div class="group"><a href="/en/nomenclature/1.html">Group 1</a></div>
             <span>Sheepdogs and Cattledogs (except Swiss Cattledogs)</span></li>
         <li><div class="group"><a href="/en/nomenclature/2.html">Group 2</a></div>
             <span>Pinscher and Schnauzer - Molossoid and Swiss Mountain and Cattledogs</span></li>
       </ul></body></html>"#
        .to_string()
}

/// `(code, name, cacib)` rows of a group page.
pub fn group_page(section: &str, sub_sections: &[&str], breeds: &[(u32, &str, bool)]) -> String {
    let sub_sections: String = sub_sections
        .iter()
        .map(|name| format!("<li><span>{name}</span></li>"))
        .collect();
    let rows: String = breeds
        .iter()
        .map(|(code, name, cacib)| {
            format!(
                r#"<tr><td class="race"><a name="{code}"></a><a class="nom" href="/en/nomenclature/breed-{code}.html">{name}</a></td>
                   <td class="racecabib"><span>{}</span></td></tr>"#,
                if *cacib { "*" } else { "" }
            )
        })
        .collect();
    format!(
        r#"<html><body>
           <ul class="sections">
             <li><span><b>Section 1 :</b> {section}</span>
               <ul class="soussections">{sub_sections}</ul></li>
           </ul>
           <table class="breeds">{rows}</table>
           </body></html>"#
    )
}

pub fn provisional_page(codes: &[u32]) -> String {
    let rows: String = codes
        .iter()
        .map(|code| {
            format!(
                r#"<tr><td><a class="nom" href="../en/nomenclature/breed-{code}.html">B{code}</a></td></tr>"#
            )
        })
        .collect();
    format!("<html><body><table>{rows}</table></body></html>")
}

pub struct BreedFixture<'a> {
    pub code: u32,
    pub name: &'a str,
    pub group: u32,
    pub section: &'a str,
    pub sub_section: Option<&'a str>,
    pub status: &'a str,
}

pub fn breed_page(breed: &BreedFixture) -> String {
    let attribute = |label: &str, value: &str| {
        format!("<tr><td><span>{label}</span></td><td><span>{value}</span></td></tr>")
    };
    let mut attributes = attribute("Section", breed.section);
    if let Some(sub_section) = breed.sub_section {
        attributes += &attribute("Subsection", sub_section);
    }
    attributes += &attribute("Official authentic language", "English");
    attributes += &attribute("Breed status", breed.status);
    attributes += &attribute("Country of origin of the breed", "Belgium, ");
    attributes += &attribute(
        "Working trial",
        "Not subject to a working trial according to the FCI breeds nomenclature",
    );

    format!(
        r#"<html><body>
           <h2 class="nom"><span>{name}</span><span>{code}</span></h2>
           <div><span>Group :</span> <a href="/en/nomenclature/{group}.html">n°{group} Group</a></div>
           <table class="racesgridview">
             <tr><th>Language</th><th>Name</th><th>Date</th><th>Standard</th></tr>
             <tr><td>English</td><td><span>{name}</span></td><td><span>-</span></td><td></td></tr>
           </table>
           <table class="racetable">{attributes}</table>
           <ul class="illustrations"><li><a href="/img/anatomy.jpg">anatomy</a></li></ul>
           </body></html>"#,
        name = breed.name,
        code = breed.code,
        group = breed.group,
    )
}

/// Two groups, two definitive breeds (15 is CACIB eligible) and one
/// provisional breed.
pub fn site() -> FixtureFetcher {
    FixtureFetcher::default()
        .with_page(GROUPS_URI, groups_page())
        .with_page(
            GROUP_1_URI,
            group_page(
                "Sheepdogs",
                &["1.1 Continental"],
                &[(15, "BELGIAN SHEPHERD DOG", true)],
            ),
        )
        .with_page(
            GROUP_2_URI,
            group_page(
                "Pinscher and Schnauzer type",
                &[],
                &[(143, "DOBERMANN", false)],
            ),
        )
        .with_page(PROVISIONAL_URI, provisional_page(&[370]))
        .with_page(
            &breed_uri(15),
            breed_page(&BreedFixture {
                code: 15,
                name: "BELGIAN SHEPHERD DOG",
                group: 1,
                section: "Sheepdogs",
                sub_section: Some("Continental"),
                status: "Recognized on a definitive basis",
            }),
        )
        .with_page(
            &breed_uri(143),
            breed_page(&BreedFixture {
                code: 143,
                name: "DOBERMANN",
                group: 2,
                section: "Pinscher and Schnauzer type",
                sub_section: None,
                status: "Recognized on a definitive basis",
            }),
        )
        .with_page(
            &breed_uri(370),
            breed_page(&BreedFixture {
                code: 370,
                name: "BRAZILIAN TERRIER",
                group: 1,
                section: "Sheepdogs",
                sub_section: None,
                status: "Recognized on a provisional basis",
            }),
        )
}

pub fn spider(fetcher: FixtureFetcher) -> FciSpider<FixtureFetcher> {
    FciSpider::with_fetcher(fetcher, SpiderConfig::default())
}
