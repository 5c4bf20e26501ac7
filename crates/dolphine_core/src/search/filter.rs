//! Listing filters for products, categories, inquiries and blog posts.

use crate::model::blog_post::BlogPost;
use crate::model::category::Category;
use crate::model::inquiry::{Inquiry, InquiryStatus};
use crate::model::product::Product;
use crate::model::validation::ValidationError;

/// Selector value that disables a scope filter.
pub const ALL_SCOPE: &str = "all";

/// Lowercased search needle. Blank input matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextQuery {
    needle: Option<String>,
}

impl TextQuery {
    pub fn new(text: &str) -> Self {
        let trimmed = text.trim();
        Self {
            needle: (!trimmed.is_empty()).then(|| trimmed.to_lowercase()),
        }
    }

    pub fn from_option(text: Option<&str>) -> Self {
        text.map(Self::new).unwrap_or_default()
    }

    pub fn is_blank(&self) -> bool {
        self.needle.is_none()
    }

    /// Returns `true` when any haystack contains the needle.
    pub fn matches_any<'a>(&self, haystacks: impl IntoIterator<Item = &'a str>) -> bool {
        match &self.needle {
            None => true,
            Some(needle) => haystacks
                .into_iter()
                .any(|haystack| haystack.to_lowercase().contains(needle.as_str())),
        }
    }
}

/// `all` or one exact value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Scope {
    #[default]
    All,
    Only(String),
}

impl Scope {
    /// Parses a selector; blank and `all` (any case) mean [`Scope::All`].
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_SCOPE) {
            Self::All
        } else {
            Self::Only(trimmed.to_string())
        }
    }

    pub fn from_option(value: Option<&str>) -> Self {
        value.map(Self::parse).unwrap_or_default()
    }

    pub fn admits(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }
}

/// Admin product table filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub text: TextQuery,
    /// Category slug scope.
    pub category: Scope,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        self.category.admits(&product.category) && product_matches_text(&self.text, product)
    }
}

/// Text match over product name and short description.
pub fn product_matches_text(text: &TextQuery, product: &Product) -> bool {
    text.matches_any([product.name.as_str(), product.description.as_str()])
}

pub fn filter_products(products: Vec<Product>, filter: &ProductFilter) -> Vec<Product> {
    products
        .into_iter()
        .filter(|product| filter.matches(product))
        .collect()
}

pub fn filter_categories(categories: Vec<Category>, text: &TextQuery) -> Vec<Category> {
    categories
        .into_iter()
        .filter(|category| {
            text.matches_any([category.name.as_str(), category.description.as_str()])
        })
        .collect()
}

/// Status selector for the inquiry inbox.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusScope {
    #[default]
    All,
    Only(InquiryStatus),
}

impl StatusScope {
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match Scope::parse(value) {
            Scope::All => Ok(Self::All),
            Scope::Only(status) => InquiryStatus::parse(&status).map(Self::Only),
        }
    }

    pub fn admits(self, status: InquiryStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == status,
        }
    }
}

/// Inquiry inbox filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InquiryFilter {
    /// Matched against name, email, company and product of interest.
    pub text: TextQuery,
    pub status: StatusScope,
}

impl InquiryFilter {
    pub fn matches(&self, inquiry: &Inquiry) -> bool {
        self.status.admits(inquiry.status)
            && self.text.matches_any(
                [
                    Some(inquiry.name.as_str()),
                    Some(inquiry.email.as_str()),
                    inquiry.company.as_deref(),
                    inquiry.product.as_deref(),
                ]
                .into_iter()
                .flatten(),
            )
    }
}

pub fn filter_inquiries(inquiries: Vec<Inquiry>, filter: &InquiryFilter) -> Vec<Inquiry> {
    inquiries
        .into_iter()
        .filter(|inquiry| filter.matches(inquiry))
        .collect()
}

/// Blog listing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogFilter {
    /// Matched against title, excerpt and every tag.
    pub text: TextQuery,
    /// Exact blog category label.
    pub category: Scope,
}

impl BlogFilter {
    pub fn matches(&self, post: &BlogPost) -> bool {
        self.category.admits(&post.category)
            && self.text.matches_any(
                [post.title.as_str(), post.excerpt.as_str()]
                    .into_iter()
                    .chain(post.tags.iter().map(String::as_str)),
            )
    }
}

pub fn filter_blog_posts(posts: Vec<BlogPost>, filter: &BlogFilter) -> Vec<BlogPost> {
    posts.into_iter().filter(|post| filter.matches(post)).collect()
}

#[cfg(test)]
mod tests {
    use super::{InquiryFilter, Scope, StatusScope, TextQuery};
    use crate::model::inquiry::{Department, Inquiry, InquiryStatus, Priority};
    use uuid::Uuid;

    fn inquiry(company: Option<&str>, status: InquiryStatus) -> Inquiry {
        Inquiry {
            id: Uuid::new_v4(),
            name: "Mike Rodriguez".to_string(),
            email: "mike@furnitureplus.example".to_string(),
            phone: String::new(),
            company: company.map(str::to_string),
            product: None,
            message: "Edge bander downtime".to_string(),
            department: Department::Support,
            status,
            priority: Priority::High,
            date: 0,
            last_reply: None,
        }
    }

    #[test]
    fn blank_query_matches_everything() {
        let query = TextQuery::new("   ");
        assert!(query.is_blank());
        assert!(query.matches_any(std::iter::empty()));
    }

    #[test]
    fn text_query_is_case_insensitive_substring() {
        let query = TextQuery::new("ROUTER");
        assert!(query.matches_any(["Desktop CNC Router"]));
        assert!(!query.matches_any(["Band Saw", "Planer"]));
    }

    #[test]
    fn scope_all_is_case_insensitive() {
        assert_eq!(Scope::parse("ALL"), Scope::All);
        assert_eq!(Scope::parse(""), Scope::All);
        assert_eq!(
            Scope::parse(" saw-mills "),
            Scope::Only("saw-mills".to_string())
        );
        assert!(Scope::parse("saw-mills").admits("saw-mills"));
        assert!(!Scope::parse("saw-mills").admits("planers"));
    }

    #[test]
    fn inquiry_filter_checks_company_and_status() {
        let filter = InquiryFilter {
            text: TextQuery::new("furniture plus"),
            status: StatusScope::All,
        };
        assert!(filter.matches(&inquiry(Some("Furniture Plus Inc"), InquiryStatus::New)));
        assert!(!filter.matches(&inquiry(None, InquiryStatus::New)));

        let filter = InquiryFilter {
            text: TextQuery::default(),
            status: StatusScope::parse("in_progress").unwrap(),
        };
        assert!(filter.matches(&inquiry(None, InquiryStatus::InProgress)));
        assert!(!filter.matches(&inquiry(None, InquiryStatus::Replied)));
        assert!(StatusScope::parse("closed").is_err());
    }
}
