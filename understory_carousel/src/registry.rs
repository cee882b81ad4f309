// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyed ownership of carousel instances.
//!
//! A page may host several carousels. [`CarouselRegistry`] maps a host key
//! (an element id, a widget id, anything `Hash + Eq`) to the instance built
//! for it, so name-based commands can be routed without ambient global state.
//! The registry is owned by whatever composes the page.

use core::hash::Hash;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use crate::carousel::Carousel;
use crate::command::{DispatchError, Reply};
use crate::surface::{EventSource, LayoutSurface};
use crate::transition::TransitionDriver;

/// Map from host key to carousel instance.
#[derive(Debug)]
pub struct CarouselRegistry<K, S, D, E> {
    instances: HashMap<K, Carousel<S, D, E>>,
}

impl<K, S, D, E> Default for CarouselRegistry<K, S, D, E> {
    fn default() -> Self {
        Self {
            instances: HashMap::new(),
        }
    }
}

impl<K, S, D, E> CarouselRegistry<K, S, D, E>
where
    K: Hash + Eq,
    S: LayoutSurface,
    D: TransitionDriver,
    E: EventSource,
{
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attached carousels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Returns `true` if nothing is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Attaches `carousel` under `key` and initializes it.
    ///
    /// If `key` already has a carousel, that one is kept (and initialized if
    /// it was destroyed) and `carousel` is dropped unused.
    pub fn attach(&mut self, key: K, carousel: Carousel<S, D, E>) -> &mut Carousel<S, D, E> {
        let instance = match self.instances.entry(key) {
            Entry::Occupied(entry) => {
                log::debug!("key already has a carousel; keeping the existing instance");
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(carousel),
        };
        instance.initialize();
        instance
    }

    /// Carousel attached under `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&Carousel<S, D, E>> {
        self.instances.get(key)
    }

    /// Carousel attached under `key`, mutably.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut Carousel<S, D, E>> {
        self.instances.get_mut(key)
    }

    /// Runs a named command on the carousel under `key`.
    pub fn dispatch(&mut self, key: &K, name: &str) -> Result<Reply, DispatchError> {
        self.instances
            .get_mut(key)
            .ok_or(DispatchError::NotAttached)?
            .dispatch(name)
    }

    /// Destroys and removes the carousel under `key`, returning it.
    pub fn detach(&mut self, key: &K) -> Option<Carousel<S, D, E>> {
        let mut carousel = self.instances.remove(key)?;
        carousel.destroy();
        Some(carousel)
    }

    /// Advances every carousel's transition to `now_ms`.
    pub fn tick(&mut self, now_ms: u64) {
        for carousel in self.instances.values_mut() {
            carousel.tick(now_ms);
        }
    }
}
