//! Product listing pipeline shared by the JSON API and the rendered pages.
//!
//! The stages always run in the same order: filter, then a stable sort by
//! price, then pagination. Categories are collected from the unfiltered
//! collection so a filter form can offer every value.

use std::collections::BTreeSet;

use serde::Deserialize;
use url::form_urlencoded;

use super::model::Product;
use super::value_objects::SortOrder;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 10;

/// Query-string values exactly as received. Every field is optional and
/// nothing is coerced here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingParams {
    pub query: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub sort: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Parsed listing parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub query: Option<String>,
    pub category: Option<String>,
    /// `None` means "do not filter by status", never "false".
    pub status: Option<bool>,
    pub sort: Option<SortOrder>,
    pub page: usize,
    pub limit: usize,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            query: None,
            category: None,
            status: None,
            sort: None,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ListingQuery {
    /// Lenient parse: blank text is absent, unknown sort/status values are
    /// absent, and non-numeric or zero page/limit fall back to the defaults.
    pub fn parse(params: &ListingParams) -> Self {
        Self {
            query: non_blank(params.query.as_deref()),
            category: non_blank(params.category.as_deref()),
            status: params.status.as_deref().and_then(parse_flag),
            sort: params
                .sort
                .as_deref()
                .and_then(|s| s.parse::<SortOrder>().ok()),
            page: positive_or(params.page.as_deref(), DEFAULT_PAGE),
            limit: positive_or(params.limit.as_deref(), DEFAULT_LIMIT),
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        if let Some(needle) = &self.query {
            let needle = needle.to_lowercase();
            let hit = [&product.title, &product.description, &product.category]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        if let Some(category) = &self.category
            && product.category.to_lowercase() != category.to_lowercase()
        {
            return false;
        }

        if let Some(status) = self.status
            && product.status != status
        {
            return false;
        }

        true
    }

    /// Builds `base?…&page=<page>` keeping every other active parameter.
    pub fn page_link(&self, base: &str, page: usize) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if let Some(text) = &self.query {
            query.append_pair("query", text);
        }
        if let Some(category) = &self.category {
            query.append_pair("category", category);
        }
        if let Some(status) = self.status {
            query.append_pair("status", if status { "true" } else { "false" });
        }
        if let Some(sort) = self.sort {
            query.append_pair("sort", &sort.to_string());
        }
        query.append_pair("limit", &self.limit.to_string());
        query.append_pair("page", &page.to_string());
        format!("{}?{}", base, query.finish())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListingPage {
    pub items: Vec<Product>,
    pub total_count: usize,
    pub total_pages: usize,
    pub page: usize,
    pub limit: usize,
    pub has_prev_page: bool,
    pub has_next_page: bool,
    pub prev_page: Option<usize>,
    pub next_page: Option<usize>,
    /// Distinct categories of the whole collection, sorted.
    pub categories: Vec<String>,
}

impl ListingPage {
    pub fn prev_link(&self, query: &ListingQuery, base: &str) -> Option<String> {
        self.prev_page.map(|page| query.page_link(base, page))
    }

    pub fn next_link(&self, query: &ListingQuery, base: &str) -> Option<String> {
        self.next_page.map(|page| query.page_link(base, page))
    }
}

/// Runs filter, sort and paginate over the full collection.
pub fn run(products: Vec<Product>, query: &ListingQuery) -> ListingPage {
    let categories = products
        .iter()
        .map(|p| p.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut filtered: Vec<Product> = products.into_iter().filter(|p| query.matches(p)).collect();

    // `sort_by` is stable, ties keep their stored order.
    match query.sort {
        Some(SortOrder::Asc) => filtered.sort_by(|a, b| a.price.cmp(&b.price)),
        Some(SortOrder::Desc) => filtered.sort_by(|a, b| b.price.cmp(&a.price)),
        None => {}
    }

    let page = query.page.max(1);
    let limit = query.limit.max(1);
    let total_count = filtered.len();
    let total_pages = total_count.div_ceil(limit);
    let start = (page - 1).saturating_mul(limit);

    let items = filtered.into_iter().skip(start).take(limit).collect();

    let has_prev_page = page > 1;
    let has_next_page = page < total_pages;

    ListingPage {
        items,
        total_count,
        total_pages,
        page,
        limit,
        has_prev_page,
        has_next_page,
        prev_page: has_prev_page.then(|| page - 1),
        next_page: has_next_page.then(|| page + 1),
        categories,
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn positive_or(value: Option<&str>, default: usize) -> usize {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|v| *v >= 1)
        .unwrap_or(default)
}
