//! Lock-free parameter storage.
//!
//! `ParameterStore` holds one atomic `u32` (f32 bit-cast) per parameter plus
//! the immutable descriptors. Any thread may read or write at any time
//! without locking. Each parameter is independently atomic; there is no
//! cross-parameter consistency, so a reader racing with a writer may see
//! some new values and some old ones.

use crate::error::PluginError;
use basicverb_core::{ParamDescriptor, ParamId, ParamKind};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

/// Callback invoked with the parameter index after every mutation that
/// changed a stored value.
pub type ChangeCallback = Box<dyn Fn(usize) + Send + Sync>;

/// Stable handle to a continuous parameter.
///
/// Only obtainable through [`ParameterStore::float_handle`], which checks
/// the kind, so reading through a handle never needs a fallible lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatHandle(usize);

/// Stable handle to a boolean parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoolHandle(usize);

impl FloatHandle {
    /// Index into the store.
    pub fn index(self) -> usize {
        self.0
    }
}

impl BoolHandle {
    /// Index into the store.
    pub fn index(self) -> usize {
        self.0
    }
}

struct StoreData {
    descriptors: Vec<ParamDescriptor>,
    values: Vec<AtomicU32>,
    on_change: Option<ChangeCallback>,
}

/// Shared, cloneable parameter store.
///
/// Clones share storage: a write through one clone is visible through all
/// of them.
#[derive(Clone)]
pub struct ParameterStore {
    inner: Arc<StoreData>,
}

impl ParameterStore {
    /// Create a store for `layout` with every value at its default.
    pub fn new(layout: &[ParamDescriptor], on_change: Option<ChangeCallback>) -> Self {
        let values = layout
            .iter()
            .map(|desc| AtomicU32::new(desc.clamp(desc.default).to_bits()))
            .collect();

        Self {
            inner: Arc::new(StoreData {
                descriptors: layout.to_vec(),
                values,
                on_change,
            }),
        }
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.inner.descriptors.len()
    }

    /// `true` for an empty layout.
    pub fn is_empty(&self) -> bool {
        self.inner.descriptors.is_empty()
    }

    /// Descriptor by index.
    pub fn descriptor(&self, index: usize) -> Option<&ParamDescriptor> {
        self.inner.descriptors.get(index)
    }

    /// All descriptors, in layout order.
    pub fn descriptors(&self) -> &[ParamDescriptor] {
        &self.inner.descriptors
    }

    /// Find a parameter index by its string id.
    pub fn index_of(&self, string_id: &str) -> Option<usize> {
        self.inner
            .descriptors
            .iter()
            .position(|d| d.string_id == string_id)
    }

    /// Find a parameter index by its numeric id.
    pub fn index_by_id(&self, id: ParamId) -> Option<usize> {
        self.inner.descriptors.iter().position(|d| d.id == id)
    }

    /// Current value (lock-free).
    pub fn get(&self, index: usize) -> Option<f32> {
        self.inner
            .values
            .get(index)
            .map(|v| f32::from_bits(v.load(Ordering::Acquire)))
    }

    /// Write a value (lock-free).
    ///
    /// The value is clamped into the descriptor's range and booleans snap to
    /// 0/1. Returns `true` and fires the change callback only if the stored
    /// value actually changed.
    pub fn set(&self, index: usize, value: f32) -> bool {
        let Some((atomic, desc)) = self
            .inner
            .values
            .get(index)
            .zip(self.inner.descriptors.get(index))
        else {
            return false;
        };

        let mut clamped = desc.clamp(value);
        // -0.0 and 0.0 are the same setting
        if clamped == 0.0 {
            clamped = 0.0;
        }
        let bits = clamped.to_bits();
        if atomic.swap(bits, Ordering::AcqRel) == bits {
            return false;
        }

        if let Some(on_change) = &self.inner.on_change {
            on_change(index);
        }
        true
    }

    /// Current value mapped to `[0, 1]`, for host automation.
    pub fn get_normalized(&self, index: usize) -> Option<f32> {
        let desc = self.descriptor(index)?;
        self.get(index).map(|v| desc.normalize(v))
    }

    /// Write a `[0, 1]` host value.
    pub fn set_normalized(&self, index: usize, normalized: f32) -> bool {
        let Some(desc) = self.descriptor(index) else {
            return false;
        };
        let value = desc.denormalize(normalized);
        self.set(index, value)
    }

    /// Return every parameter to its default. Returns how many changed.
    pub fn reset_to_defaults(&self) -> usize {
        (0..self.len())
            .filter(|&i| {
                let default = self.inner.descriptors[i].default;
                self.set(i, default)
            })
            .count()
    }

    /// Resolve a continuous parameter by string id.
    pub fn float_handle(&self, string_id: &str) -> Result<FloatHandle, PluginError> {
        self.resolve(string_id, ParamKind::Continuous).map(FloatHandle)
    }

    /// Resolve a boolean parameter by string id.
    pub fn bool_handle(&self, string_id: &str) -> Result<BoolHandle, PluginError> {
        self.resolve(string_id, ParamKind::Boolean).map(BoolHandle)
    }

    fn resolve(&self, string_id: &str, expected: ParamKind) -> Result<usize, PluginError> {
        let index = self
            .index_of(string_id)
            .ok_or_else(|| PluginError::UnknownParameter(string_id.to_string()))?;
        let found = self.inner.descriptors[index].kind;
        if found != expected {
            return Err(PluginError::KindMismatch {
                id: string_id.to_string(),
                expected: expected.as_str(),
                found: found.as_str(),
            });
        }
        Ok(index)
    }

    /// Read a continuous parameter.
    #[inline]
    pub fn read_float(&self, handle: FloatHandle) -> f32 {
        self.get(handle.0).unwrap_or_default()
    }

    /// Read a boolean parameter.
    #[inline]
    pub fn read_bool(&self, handle: BoolHandle) -> bool {
        match (self.descriptor(handle.0), self.get(handle.0)) {
            (Some(desc), Some(value)) => desc.is_on(value),
            _ => false,
        }
    }

    /// Write a continuous parameter. See [`set`](Self::set).
    pub fn set_float(&self, handle: FloatHandle, value: f32) -> bool {
        self.set(handle.0, value)
    }

    /// Write a boolean parameter. See [`set`](Self::set).
    pub fn set_bool(&self, handle: BoolHandle, on: bool) -> bool {
        self.set(handle.0, if on { 1.0 } else { 0.0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{FREEZE, REVERB_PARAMS, ROOM_SIZE, WET_LEVEL};
    use std::sync::Mutex;

    fn recording_store() -> (ParameterStore, Arc<Mutex<Vec<usize>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let store = ParameterStore::new(
            &REVERB_PARAMS,
            Some(Box::new(move |i| sink.lock().unwrap().push(i))),
        );
        (store, log)
    }

    #[test]
    fn defaults_match_descriptors() {
        let store = ParameterStore::new(&REVERB_PARAMS, None);
        assert_eq!(store.len(), 6);
        for (i, desc) in store.descriptors().iter().enumerate() {
            assert_eq!(store.get(i), Some(desc.default), "{}", desc.name);
        }
        assert_eq!(store.get(6), None);
    }

    #[test]
    fn set_clamps_to_range() {
        let store = ParameterStore::new(&REVERB_PARAMS, None);
        let room = store.index_of(ROOM_SIZE).unwrap();

        store.set(room, 7.0);
        assert_eq!(store.get(room), Some(1.0));
        store.set(room, -7.0);
        assert_eq!(store.get(room), Some(0.0));
        store.set(room, 0.55);
        assert_eq!(store.get(room), Some(0.55));
    }

    #[test]
    fn boolean_values_snap() {
        let store = ParameterStore::new(&REVERB_PARAMS, None);
        let freeze = store.index_of(FREEZE).unwrap();
        store.set(freeze, 0.8);
        assert_eq!(store.get(freeze), Some(1.0));
        store.set(freeze, 0.1);
        assert_eq!(store.get(freeze), Some(0.0));
    }

    #[test]
    fn callback_fires_only_on_change() {
        let (store, log) = recording_store();
        let wet = store.index_of(WET_LEVEL).unwrap();

        assert!(store.set(wet, 0.8));
        assert!(!store.set(wet, 0.8));
        // Clamps to the value already stored
        assert!(store.set(wet, 1.0));
        assert!(!store.set(wet, 5.0));
        // Writing the default again is not a change
        assert!(!store.set(0, 0.3));
        assert!(!store.set(99, 0.5));

        assert_eq!(*log.lock().unwrap(), vec![wet, wet]);
    }

    #[test]
    fn negative_zero_is_not_a_change() {
        let (store, log) = recording_store();
        store.set(0, 0.0);
        store.set(0, -0.0);
        assert_eq!(store.get(0).map(f32::to_bits), Some(0.0f32.to_bits()));
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn lookup_by_ids() {
        let store = ParameterStore::new(&REVERB_PARAMS, None);
        assert_eq!(store.index_of(ROOM_SIZE), Some(0));
        assert_eq!(store.index_of(FREEZE), Some(5));
        assert_eq!(store.index_of("r_predelay"), None);
        assert_eq!(store.index_by_id(ParamId(1503)), Some(3));
        assert_eq!(store.index_by_id(ParamId(9)), None);
    }

    #[test]
    fn handles_check_kind() {
        let store = ParameterStore::new(&REVERB_PARAMS, None);
        assert!(store.float_handle(ROOM_SIZE).is_ok());
        assert!(store.bool_handle(FREEZE).is_ok());

        assert!(matches!(
            store.float_handle(FREEZE),
            Err(PluginError::KindMismatch { expected: "continuous", found: "boolean", .. })
        ));
        assert!(matches!(
            store.bool_handle(ROOM_SIZE),
            Err(PluginError::KindMismatch { expected: "boolean", .. })
        ));
        assert!(matches!(
            store.float_handle("nope"),
            Err(PluginError::UnknownParameter(ref id)) if id == "nope"
        ));
    }

    #[test]
    fn handle_reads_and_writes() {
        let store = ParameterStore::new(&REVERB_PARAMS, None);
        let room = store.float_handle(ROOM_SIZE).unwrap();
        let freeze = store.bool_handle(FREEZE).unwrap();
        assert_eq!(room.index(), 0);
        assert_eq!(freeze.index(), 5);

        assert!(!store.read_bool(freeze));
        assert!(store.set_bool(freeze, true));
        assert!(store.read_bool(freeze));

        assert!(store.set_float(room, 0.9));
        assert_eq!(store.read_float(room), 0.9);
    }

    #[test]
    fn clones_share_storage() {
        let (store, log) = recording_store();
        let other = store.clone();
        other.set(2, 0.9);
        assert_eq!(store.get(2), Some(0.9));
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn normalized_surface() {
        let store = ParameterStore::new(&REVERB_PARAMS, None);
        assert!((store.get_normalized(0).unwrap() - 0.3).abs() < 1e-6);
        store.set_normalized(0, 2.0);
        assert_eq!(store.get(0), Some(1.0));
        store.set_normalized(5, 0.6);
        assert_eq!(store.get(5), Some(1.0));
        assert!(!store.set_normalized(42, 0.5));
    }

    #[test]
    fn reset_to_defaults_counts_changes() {
        let (store, log) = recording_store();
        store.set(0, 0.9);
        store.set(5, 1.0);
        log.lock().unwrap().clear();

        assert_eq!(store.reset_to_defaults(), 2);
        assert_eq!(*log.lock().unwrap(), vec![0, 5]);
        assert_eq!(store.reset_to_defaults(), 0);
    }
}
