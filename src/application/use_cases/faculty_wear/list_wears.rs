use crate::application::ports::faculty_wear_repository::FacultyWearRepository;
use crate::domain::faculty_wear::FacultyWear;

pub const DEFAULT_PAGE_SIZE: i64 = 5;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}

#[derive(Debug, Clone)]
pub struct WearPage {
    pub items: Vec<FacultyWear>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

pub struct ListWears<'a, R: FacultyWearRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: FacultyWearRepository + ?Sized> ListWears<'a, R> {
    pub async fn execute(&self, query: &ListQuery) -> anyhow::Result<WearPage> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let total = self.repo.count(search).await?;
        let offset = (page - 1).saturating_mul(limit);
        let items = self.repo.list(search, offset, limit).await?;
        Ok(WearPage {
            items,
            total,
            page,
            limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{InMemoryWearRepository, draft};

    async fn seeded() -> InMemoryWearRepository {
        let repo = InMemoryWearRepository::default();
        for (title, order) in [("Sash", 3), ("Gown", 1), ("Cap", 2), ("Hood", 4)] {
            let mut d = draft(title);
            d.display_order = order;
            repo.insert(&d, "").await.unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn pages_are_sorted_by_display_order() {
        let repo = seeded().await;
        let uc = ListWears { repo: &repo };
        let page = uc
            .execute(&ListQuery {
                page: Some(2),
                limit: Some(2),
                search: None,
            })
            .await
            .unwrap();
        assert_eq!(page.total, 4);
        assert_eq!(page.page, 2);
        let titles: Vec<_> = page.items.iter().map(|w| w.title.as_str()).collect();
        assert_eq!(titles, vec!["Sash", "Hood"]);
    }

    #[tokio::test]
    async fn defaults_and_clamping() {
        let repo = seeded().await;
        let uc = ListWears { repo: &repo };
        let page = uc.execute(&ListQuery::default()).await.unwrap();
        assert_eq!((page.page, page.limit), (1, DEFAULT_PAGE_SIZE));

        let page = uc
            .execute(&ListQuery {
                page: Some(-4),
                limit: Some(10_000),
                search: Some("   ".into()),
            })
            .await
            .unwrap();
        assert_eq!((page.page, page.limit), (1, MAX_PAGE_SIZE));
        assert_eq!(page.items.len(), 4);
    }

    #[tokio::test]
    async fn search_is_case_insensitive() {
        let repo = seeded().await;
        let uc = ListWears { repo: &repo };
        let page = uc
            .execute(&ListQuery {
                search: Some(" gOwN ".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].title, "Gown");
    }
}
