//! Client-side resource state.
//!
//! One independent slice per resource. Slices never read or write each
//! other; a page that shows news next to home content just reads two
//! slices.

mod lifecycle;
mod singleton;
mod slice;

pub use lifecycle::{OperationKind, Outcome, Ticket};
pub use singleton::SingletonSlice;
pub use slice::Slice;

use crate::resources::{AboutContent, Category, Event, GalleryItem, HomeContent, Milestone, News, Product};

/// Every slice the site uses, each starting empty and idle.
#[derive(Debug, Clone, Default)]
pub struct ClubState {
    pub events: Slice<Event>,
    pub news: Slice<News>,
    pub products: Slice<Product>,
    pub categories: Slice<Category>,
    pub gallery: Slice<GalleryItem>,
    pub milestones: Slice<Milestone>,
    pub about: SingletonSlice<AboutContent>,
    pub home: SingletonSlice<HomeContent>,
}

impl ClubState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while any slice has a request in flight.
    pub fn loading(&self) -> bool {
        self.events.loading()
            || self.news.loading()
            || self.products.loading()
            || self.categories.loading()
            || self.gallery.loading()
            || self.milestones.loading()
            || self.about.loading()
            || self.home.loading()
    }
}
