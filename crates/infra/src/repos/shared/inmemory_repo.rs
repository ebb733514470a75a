use mediscan_domain::{Entity, ID};
use std::sync::Mutex;

/// Useful functions for creating inmemory repositories

pub fn insert<T: Clone>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = collection.lock().unwrap();
    collection.push(val.clone());
}

pub fn bulk_insert<T: Clone>(vals: &[T], collection: &Mutex<Vec<T>>) {
    let mut collection = collection.lock().unwrap();
    collection.extend_from_slice(vals);
}

pub fn save<T: Clone + Entity>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = collection.lock().unwrap();
    if let Some(existing) = collection.iter_mut().find(|item| item.id() == val.id()) {
        *existing = val.clone();
    }
}

pub fn find<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let collection = collection.lock().unwrap();
    collection.iter().find(|item| item.id() == val_id).cloned()
}

pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(collection: &Mutex<Vec<T>>, mut compare: F) -> Vec<T> {
    let collection = collection.lock().unwrap();
    collection.iter().filter(|item| compare(item)).cloned().collect()
}

/// Removes and returns the first item matching `compare`
pub fn find_and_delete_one_by<T, F: Fn(&T) -> bool>(
    collection: &Mutex<Vec<T>>,
    compare: F,
) -> Option<T> {
    let mut collection = collection.lock().unwrap();
    let index = collection.iter().position(|item| compare(item))?;
    Some(collection.remove(index))
}

/// Applies `update` to the first item matching `compare` and returns the updated item
pub fn update_one_by<T: Clone, F: Fn(&T) -> bool, U: FnOnce(&mut T)>(
    collection: &Mutex<Vec<T>>,
    compare: F,
    update: U,
) -> Option<T> {
    let mut collection = collection.lock().unwrap();
    let item = collection.iter_mut().find(|item| compare(item))?;
    update(item);
    Some(item.clone())
}
