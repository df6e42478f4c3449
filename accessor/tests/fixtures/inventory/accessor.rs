// Code generated by accessor; DO NOT EDIT.

#![allow(non_snake_case, unused_imports, clippy::clone_on_copy)]

use super::*;

use std::collections;
use std::time;

use super::catalog::util;
use super::pricing::util as util1;

/// Item.sku: Get,Set
impl Item {
    pub fn GetSku(&self) -> util::Sku {
        self.sku.clone()
    }
    pub fn SetSku(&mut self, value: util::Sku) {
        self.sku = value;
    }
}
/// Item.price: Get,Set
impl Item {
    pub fn GetPrice(&self) -> util1::Cents {
        self.price.clone()
    }
    pub fn SetPrice(&mut self, value: util1::Cents) {
        self.price = value;
    }
}
/// Item.shelf_life: get,set
impl Item {
    pub(super) fn getShelf_life(&self) -> time::Duration {
        self.shelf_life.clone()
    }
    pub(super) fn setShelf_life(&mut self, value: time::Duration) {
        self.shelf_life = value;
    }
}
/// Item.name: Get,Title
impl Item {
    pub fn GetTitle(&self) -> String {
        self.name.clone()
    }
}
/// Item.tags: Get
impl Item {
    pub fn GetTags(&self) -> collections::BTreeMap<String, u32> {
        self.tags.clone()
    }
}
/// Slot<T>.value: Get,Set
impl<T: Clone> Slot<T> {
    pub fn GetValue(&self) -> T {
        self.value.clone()
    }
    pub fn SetValue(&mut self, value: T) {
        self.value = value;
    }
}
/// Slot<T>.label: Custom
impl<T: Clone> Slot<T> {}
