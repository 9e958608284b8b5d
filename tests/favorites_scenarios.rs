//! End-to-end favorites behavior through the public API: page reloads,
//! shared storage between tabs, and the page surface staying in sync.

use std::cell::RefCell;
use std::rc::Rc;

use puceats_client::components::favorite_controls::{self, ControlView, FavoriteControl, FavoritesSurface};
use puceats_client::components::favorites_badge::BadgeView;
use puceats_client::config::{FavoritesConfig, PageConfig};
use puceats_client::state::favorites::{FavoriteChanged, FavoritesStore, RestaurantId};
use puceats_client::util::storage::MemoryStorage;

fn id(n: u64) -> RestaurantId {
    RestaurantId::new(n)
}

#[derive(Clone)]
struct Button {
    attribute: String,
    active: Rc<RefCell<bool>>,
}

impl FavoriteControl for Button {
    fn restaurant_id(&self) -> Option<RestaurantId> {
        RestaurantId::parse(&self.attribute)
    }

    fn render(&self, view: &ControlView<'_>) {
        *self.active.borrow_mut() = view.active;
    }
}

#[derive(Default)]
struct Page {
    buttons: Vec<Button>,
    badge: RefCell<String>,
    events: RefCell<Vec<FavoriteChanged>>,
}

impl FavoritesSurface for Page {
    type Control = Button;

    fn controls(&self) -> Vec<Button> {
        self.buttons.clone()
    }

    fn render_badge(&self, view: &BadgeView) {
        *self.badge.borrow_mut() = if view.visible { view.text.clone() } else { String::new() };
    }

    fn announce(&self, event: &FavoriteChanged) {
        self.events.borrow_mut().push(*event);
    }
}

fn button(attribute: &str) -> Button {
    Button { attribute: attribute.to_owned(), active: Rc::default() }
}

#[test]
fn favorites_survive_a_page_reload() {
    let storage = MemoryStorage::new();
    let config = PageConfig::default().favorites;

    let first_visit = FavoritesStore::open(storage.clone(), &config);
    first_visit.add(id(10));
    first_visit.add(id(20));
    first_visit.toggle(id(10));
    drop(first_visit.close());

    let second_visit = FavoritesStore::open(storage.clone(), &config);
    assert_eq!(second_visit.list(), vec![id(20)]);
    assert_eq!(storage.raw("pucEatsFavorites").as_deref(), Some("[20]"));
}

#[test]
fn two_tabs_are_last_write_wins_per_operation() {
    let storage = MemoryStorage::new();
    let config = FavoritesConfig::default();
    let tab_a = FavoritesStore::open(storage.clone(), &config);
    let tab_b = FavoritesStore::open(storage, &config);

    tab_a.add(id(1));
    tab_b.add(id(2));
    assert_eq!(tab_a.list(), vec![id(1), id(2)], "each write re-reads storage first");

    tab_b.clear();
    assert!(tab_a.list().is_empty());
}

#[test]
fn page_with_duplicate_controls_stays_consistent() {
    let config = Rc::new(FavoritesConfig::default());
    let mut store = FavoritesStore::open(MemoryStorage::new(), &config);
    let card = button("5");
    let sidebar = button("5");
    let page = Rc::new(Page { buttons: vec![card.clone(), sidebar.clone(), button("6")], ..Page::default() });
    favorite_controls::attach(&mut store, Rc::clone(&page), Rc::clone(&config));
    assert_eq!(*page.badge.borrow(), "");

    let clicked = favorite_controls::handle_click(&store, &sidebar, &config);
    assert_eq!(clicked, Some(FavoriteChanged { restaurant_id: id(5), is_favorite: true }));
    assert!(*card.active.borrow());
    assert!(*sidebar.active.borrow());
    assert_eq!(*page.badge.borrow(), "1");

    favorite_controls::handle_click(&store, &card, &config);
    assert!(!*card.active.borrow());
    assert!(!*sidebar.active.borrow());
    assert_eq!(*page.badge.borrow(), "");
    assert_eq!(
        *page.events.borrow(),
        vec![
            FavoriteChanged { restaurant_id: id(5), is_favorite: true },
            FavoriteChanged { restaurant_id: id(5), is_favorite: false },
        ]
    );
}
