use crate::database::BookRepository;
use crate::features::books::model::BookPage;
use crate::features::books::query::ListQuery;
use anyhow::Result;

// a listing is two reads: the unpaginated match count, then the requested slice
pub async fn list_page(repo: &dyn BookRepository, query: &ListQuery) -> Result<BookPage> {
    let total = repo.count_books(query.search.as_deref()).await?;
    let items = repo.list_books(query).await?;

    tracing::debug!(
        total,
        returned = items.len(),
        page = query.page,
        page_size = query.page_size,
        sort = %query.sort,
        order = %query.order,
        "Listed books"
    );

    Ok(BookPage {
        total,
        page: query.page,
        page_size: query.page_size,
        sort: query.sort,
        order: query.order,
        items,
    })
}
