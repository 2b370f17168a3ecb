use std::collections::HashSet;
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};

use fci_crawler::{Fetcher, HttpFetcher};
use futures::{stream, StreamExt, TryStreamExt};
use tokio::sync::OnceCell;

use crate::breed::extract_breed;
use crate::cacib;
use crate::config::SpiderConfig;
use crate::error::{Result, SpiderError};
use crate::model::{Breed, Group, Section};
use crate::taxonomy::{extract_breed_links, extract_groups, extract_sections};

/// Memoized values of one cache lifetime, `clear_cache` starts a new one.
#[derive(Debug, Default)]
struct CacheGeneration {
    epoch: u64,
    groups: OnceCell<Vec<Arc<Group>>>,
    sections: OnceCell<Vec<Arc<Section>>>,
    definitive_uris: OnceCell<Vec<String>>,
    provisional_uris: OnceCell<Vec<String>>,
}

impl CacheGeneration {
    fn new(epoch: u64) -> Self {
        Self {
            epoch,
            ..Default::default()
        }
    }
}

/// Groups and sections every breed of a listing resolves against.
struct Taxonomy {
    groups: Vec<Arc<Group>>,
    sections: Vec<Arc<Section>>,
}

/// Crawls the FCI nomenclature.
///
/// Every listing is all or nothing: the first download or extraction failure
/// aborts it.
pub struct FciSpider<F = HttpFetcher> {
    fetcher: F,
    config: SpiderConfig,
    cache: RwLock<Arc<CacheGeneration>>,
}

impl FciSpider<HttpFetcher> {
    pub fn new(config: SpiderConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(config.crawler.clone())?;
        Ok(Self::with_fetcher(fetcher, config))
    }
}

impl<F: Fetcher> FciSpider<F> {
    pub fn with_fetcher(fetcher: F, config: SpiderConfig) -> Self {
        Self {
            fetcher,
            config,
            cache: RwLock::new(Arc::new(CacheGeneration::new(0))),
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub async fn list_groups(&self) -> Result<Vec<Arc<Group>>> {
        let generation = self.generation();
        self.groups(&generation).await
    }

    /// Sections of every group, in group order.
    pub async fn list_sections(&self) -> Result<Vec<Arc<Section>>> {
        let generation = self.generation();
        let groups = self.groups(&generation).await?;
        self.sections(&generation, &groups).await
    }

    /// Breeds linked from the group pages, with their CACIB flag.
    pub async fn list_definitive_breeds(&self) -> Result<Vec<Breed>> {
        let generation = self.generation();
        let taxonomy = self.taxonomy(&generation).await?;
        self.definitive_breeds(&generation, &taxonomy).await
    }

    pub async fn list_provisional_breeds(&self) -> Result<Vec<Breed>> {
        let generation = self.generation();
        let taxonomy = self.taxonomy(&generation).await?;
        self.provisional_breeds(&generation, &taxonomy).await
    }

    /// Definitive then provisional breeds, a breed code listed in both is an
    /// integrity error.
    pub async fn list_all_breeds(&self) -> Result<Vec<Breed>> {
        let generation = self.generation();
        let taxonomy = self.taxonomy(&generation).await?;
        let mut breeds = self.definitive_breeds(&generation, &taxonomy).await?;
        breeds.extend(self.provisional_breeds(&generation, &taxonomy).await?);

        let mut codes = HashSet::with_capacity(breeds.len());
        if let Some(duplicate) = breeds.iter().find(|breed| !codes.insert(breed.code)) {
            return Err(SpiderError::integrity(
                &duplicate.detail_page_uri,
                format!("breed code {} listed twice", duplicate.code),
            ));
        }

        Ok(breeds)
    }

    /// Forgets every memoized value, calls already running keep the values
    /// they started with.
    pub fn clear_cache(&self) {
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        let epoch = cache.epoch + 1;
        *cache = Arc::new(CacheGeneration::new(epoch));
        log::debug!("Cleared cache, now at epoch {epoch}");
    }

    fn generation(&self) -> Arc<CacheGeneration> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn download_slots(&self) -> usize {
        self.config.crawler.download_slots()
    }

    async fn cached<T, Fut>(
        &self,
        cell: &OnceCell<T>,
        what: &str,
        init: impl FnOnce() -> Fut,
    ) -> Result<T>
    where
        T: Clone,
        Fut: Future<Output = Result<T>>,
    {
        if !self.config.cache {
            return init().await;
        }
        if let Some(value) = cell.get() {
            log::debug!("Using cached {what}");
            return Ok(value.clone());
        }
        cell.get_or_try_init(init).await.cloned()
    }

    async fn groups(&self, generation: &CacheGeneration) -> Result<Vec<Arc<Group>>> {
        self.cached(&generation.groups, "groups", || async {
            let page = self.fetcher.fetch(&self.config.groups_uri).await?;
            let groups = extract_groups(&page, &self.config.base_uri)?;
            Ok::<_, SpiderError>(groups.into_iter().map(Arc::new).collect())
        })
        .await
    }

    /// Sections of `groups`, memoized along with them.
    async fn sections(
        &self,
        generation: &CacheGeneration,
        groups: &[Arc<Group>],
    ) -> Result<Vec<Arc<Section>>> {
        self.cached(&generation.sections, "sections", || async {
            let sections: Vec<Vec<Section>> = stream::iter(groups)
                .map(|group| async move {
                    let page = self.fetcher.fetch(&group.detail_page_uri).await?;
                    extract_sections(&page, group)
                })
                .buffered(self.download_slots())
                .try_collect()
                .await?;

            let sections: Vec<_> = sections.into_iter().flatten().map(Arc::new).collect();
            log::info!("Extracted {} sections", sections.len());
            Ok::<_, SpiderError>(sections)
        })
        .await
    }

    /// Groups and their sections, from a single download of the groups page.
    async fn taxonomy(&self, generation: &CacheGeneration) -> Result<Taxonomy> {
        let groups = self.groups(generation).await?;
        let sections = self.sections(generation, &groups).await?;
        Ok(Taxonomy { groups, sections })
    }

    async fn definitive_uris(
        &self,
        generation: &CacheGeneration,
        groups: &[Arc<Group>],
    ) -> Result<Vec<String>> {
        self.cached(&generation.definitive_uris, "definitive breed links", || async {
            let links: Vec<Vec<String>> = stream::iter(groups)
                .map(|group| async move {
                    let page = self.fetcher.fetch(&group.detail_page_uri).await?;
                    extract_breed_links(&page, &self.config.base_uri)
                })
                .buffered(self.download_slots())
                .try_collect()
                .await?;
            Ok::<_, SpiderError>(links.into_iter().flatten().collect())
        })
        .await
    }

    async fn provisional_uris(&self, generation: &CacheGeneration) -> Result<Vec<String>> {
        self.cached(&generation.provisional_uris, "provisional breed links", || async {
            let page = self.fetcher.fetch(&self.config.provisional_uri).await?;
            extract_breed_links(&page, &self.config.base_uri)
        })
        .await
    }

    async fn definitive_breeds(
        &self,
        generation: &CacheGeneration,
        taxonomy: &Taxonomy,
    ) -> Result<Vec<Breed>> {
        let uris = self.definitive_uris(generation, &taxonomy.groups).await?;
        let breeds = self.breeds(taxonomy, &uris).await?;
        let breeds = cacib::enrich(
            &self.fetcher,
            breeds,
            &taxonomy.groups,
            self.download_slots(),
        )
        .await?;
        log::info!("Extracted {} definitive breeds", breeds.len());
        Ok(breeds)
    }

    async fn provisional_breeds(
        &self,
        generation: &CacheGeneration,
        taxonomy: &Taxonomy,
    ) -> Result<Vec<Breed>> {
        let uris = self.provisional_uris(generation).await?;
        let breeds = self.breeds(taxonomy, &uris).await?;
        log::info!("Extracted {} provisional breeds", breeds.len());
        Ok(breeds)
    }

    /// One breed per detail page, in the order of `uris`.
    async fn breeds(&self, taxonomy: &Taxonomy, uris: &[String]) -> Result<Vec<Breed>> {
        stream::iter(uris)
            .map(|uri| async move {
                let page = self.fetcher.fetch(uri).await?;
                extract_breed(
                    &page,
                    &self.config.base_uri,
                    &taxonomy.groups,
                    &taxonomy.sections,
                )
            })
            .buffered(self.download_slots())
            .try_collect()
            .await
    }
}
