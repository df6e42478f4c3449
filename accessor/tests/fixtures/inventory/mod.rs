//! Inventory records with generated accessors.

use std::collections::BTreeMap;
use std::time::Duration;

use accessor_macros::Accessor;

use self::catalog::util;
use self::pricing::util as price_util;

mod accessor;

pub mod catalog {
    pub mod util {
        #[derive(Debug, Clone, PartialEq, Eq, Default)]
        pub struct Sku(pub String);
    }
}

pub mod pricing {
    pub mod util {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct Cents(pub i64);
    }
}

#[derive(Accessor, Debug, Default)]
pub struct Item {
    #[accessor = "Get,Set"]
    sku: util::Sku,
    #[accessor = "Get,Set"]
    price: price_util::Cents,
    #[accessor = "get,set"]
    shelf_life: Duration,
    #[accessor(Get, Title)]
    name: String,
    #[accessor = "Get"]
    tags: BTreeMap<String, u32>,
    notes: String,
}

impl Item {
    pub fn tag(&mut self, name: &str, count: u32) {
        self.tags.insert(name.to_string(), count);
    }

    pub fn rename(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }
}

/// Sets the shelf life in whole days and reads it back.
pub fn restock(item: &mut Item, days: u64) -> Duration {
    item.setShelf_life(Duration::from_secs(days * 86_400));
    item.getShelf_life()
}

#[derive(Accessor, Debug, Clone)]
pub struct Slot<T: Clone> {
    #[accessor = "Get,Set"]
    value: T,
    #[accessor = "Custom"]
    label: String,
}

impl<T: Clone> Slot<T> {
    pub fn new(value: T, label: &str) -> Self {
        Self {
            value,
            label: label.to_string(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}
