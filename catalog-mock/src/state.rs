//! In-memory store behind the mock API

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use shared::models::{AdminProfile, Blog, CatalogItem, CatalogKind, ContentBlock, Product, Query};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::MockConfig;

/// Shared handle passed to every handler
pub type SharedState = Arc<MockState>;

/// Everything the mock API stores
#[derive(Debug)]
pub struct Store {
    pub categories: Vec<CatalogItem>,
    pub materials: Vec<CatalogItem>,
    pub sizes: Vec<CatalogItem>,
    pub products: Vec<Product>,
    pub blogs: Vec<Blog>,
    pub queries: Vec<Query>,
    pub admin: AdminProfile,
    pub password: String,
    pub tokens: HashSet<String>,
    last_stamp: DateTime<Utc>,
}

impl Store {
    fn new(config: &MockConfig) -> Self {
        Self {
            categories: Vec::new(),
            materials: Vec::new(),
            sizes: Vec::new(),
            products: Vec::new(),
            blogs: Vec::new(),
            queries: Vec::new(),
            admin: AdminProfile {
                id: new_id(),
                name: "Admin".to_string(),
                email: config.admin_email.clone(),
                phone: None,
                avatar: None,
                created_at: Some(Utc::now()),
                updated_at: None,
                last_login: None,
            },
            password: config.admin_password.clone(),
            tokens: HashSet::new(),
            last_stamp: DateTime::<Utc>::MIN_UTC,
        }
    }

    /// Current time, strictly later than any stamp handed out before
    pub fn stamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let next = if now > self.last_stamp {
            now
        } else {
            self.last_stamp + Duration::milliseconds(1)
        };
        self.last_stamp = next;
        next
    }

    pub fn catalog(&self, kind: CatalogKind) -> &Vec<CatalogItem> {
        match kind {
            CatalogKind::Category => &self.categories,
            CatalogKind::Material => &self.materials,
            CatalogKind::Size => &self.sizes,
        }
    }

    pub fn catalog_mut(&mut self, kind: CatalogKind) -> &mut Vec<CatalogItem> {
        match kind {
            CatalogKind::Category => &mut self.categories,
            CatalogKind::Material => &mut self.materials,
            CatalogKind::Size => &mut self.sizes,
        }
    }

    /// Insert a catalog item with a fresh id and stamp
    pub fn add_catalog(&mut self, kind: CatalogKind, name: &str) -> CatalogItem {
        let now = self.stamp();
        let item = CatalogItem {
            id: new_id(),
            name: name.to_string(),
            is_active: true,
            created_at: Some(now),
            updated_at: Some(now),
        };
        self.catalog_mut(kind).push(item.clone());
        item
    }

    fn seed(&mut self) {
        for name in ["Cups", "Plates", "Bowls"] {
            self.add_catalog(CatalogKind::Category, name);
        }
        for name in ["Paper", "Bagasse", "Wood"] {
            self.add_catalog(CatalogKind::Material, name);
        }
        for name in ["Small", "Medium", "Large"] {
            self.add_catalog(CatalogKind::Size, name);
        }

        for (name, category, material, qty, price) in [
            ("Ripple Paper Cup", "Cups", "Paper", 50, 12.5),
            ("Round Bagasse Plate", "Plates", "Bagasse", 25, 9.0),
        ] {
            let now = self.stamp();
            self.products.push(Product {
                id: new_id(),
                name: name.to_string(),
                category: category.to_string(),
                material: material.to_string(),
                size: Some("Medium".to_string()),
                quantity_per_pack: qty,
                price_per_pack: price,
                description: Some(format!("{name}, sold in packs of {qty}")),
                is_active: true,
                images: vec![format!("/uploads/{}.jpg", name.to_lowercase().replace(' ', "-"))],
                created_at: Some(now),
                updated_at: Some(now),
            });
        }

        let now = self.stamp();
        self.blogs.push(Blog {
            id: new_id(),
            title: "Why compostable packaging".to_string(),
            description: "A short guide to plant-based tableware".to_string(),
            images: vec!["/uploads/blog-cover.jpg".to_string()],
            content: vec![ContentBlock {
                id: Some(new_id()),
                icon: "/uploads/leaf.png".to_string(),
                title: "Made from plants".to_string(),
                description: "Bagasse is a by-product of sugar cane".to_string(),
            }],
            is_active: true,
            created_at: Some(now),
            updated_at: Some(now),
        });

        for (first, last, email) in [
            ("Asha", "Patel", "asha@example.com"),
            ("Tom", "Baker", "tom@example.com"),
        ] {
            let now = self.stamp();
            self.queries.push(Query {
                id: Some(new_id()),
                first_name: first.to_string(),
                last_name: last.to_string(),
                email: email.to_string(),
                phone: "5550100".to_string(),
                message: "Do you ship bulk orders?".to_string(),
                created_at: Some(now),
            });
        }
    }
}

/// Mock server state
#[derive(Debug)]
pub struct MockState {
    pub config: MockConfig,
    store: RwLock<Store>,
}

impl MockState {
    /// Empty catalog with one admin account
    pub fn new(config: MockConfig) -> Self {
        let store = Store::new(&config);
        Self {
            config,
            store: RwLock::new(store),
        }
    }

    /// Catalog with a few rows of everything
    pub fn seeded(config: MockConfig) -> Self {
        let mut store = Store::new(&config);
        store.seed();
        Self {
            config,
            store: RwLock::new(store),
        }
    }

    pub fn shared(self) -> SharedState {
        Arc::new(self)
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, Store> {
        self.store.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, Store> {
        self.store.write().await
    }

    pub async fn issue_token(&self) -> String {
        let token = uuid::Uuid::new_v4().simple().to_string();
        self.store.write().await.tokens.insert(token.clone());
        token
    }

    pub async fn has_token(&self, token: &str) -> bool {
        self.store.read().await.tokens.contains(token)
    }
}

impl Default for MockState {
    fn default() -> Self {
        Self::new(MockConfig::default())
    }
}

/// Mongo-style hex id
pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
