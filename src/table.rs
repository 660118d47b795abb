use crate::utils::MyHash;

/// End-of-chain marker for bucket chains.
const NIL: usize = usize::MAX;

#[derive(Clone)]
struct Entry<T> {
    value: T,
    next: usize,
}

impl<T> Entry<T> {
    /// Get the reference to the value.
    pub fn value(&self) -> &T {
        &self.value
    }
}

/// Append-only hash-consing table.
///
/// Values are stored densely in insertion order, so the index of a value is
/// also its identifier. Each bucket is a singly linked chain threaded through
/// the cells. Cells are never removed or moved; the bucket array is rebuilt
/// when the load factor exceeds two.
pub struct Table<T> {
    data: Vec<Entry<T>>,

    buckets: Vec<usize>,
    bitmask: u64,
}

impl<T> Table<T> {
    /// Create a new table with `2^bits` buckets and room for as many values.
    pub fn new(bits: usize) -> Self {
        assert!(bits <= 31, "Storage bits should be in the range 0..=31");

        let buckets_size = 1 << bits;
        Self {
            data: Vec::with_capacity(buckets_size),
            buckets: vec![NIL; buckets_size],
            bitmask: (buckets_size - 1) as u64,
        }
    }

    /// Get the number of stored values.
    pub fn len(&self) -> usize {
        self.data.len()
    }
    /// Check whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
    /// Index that the next inserted value will receive.
    pub fn next_index(&self) -> usize {
        self.data.len()
    }

    /// Get the reference to the value at the given index.
    pub fn value(&self, index: usize) -> &T {
        assert!(
            index < self.data.len(),
            "Index {} is out of bounds (size {})",
            index,
            self.data.len()
        );
        self.data[index].value()
    }

    /// Iterate over all values in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.data.iter().map(Entry::value)
    }
}

impl<T> Table<T>
where
    T: MyHash + Eq,
{
    fn bucket_index(&self, value: &T) -> usize {
        (value.hash() & self.bitmask) as usize
    }

    /// Find the index of the given value.
    pub fn find(&self, value: &T) -> Option<usize> {
        let mut index = self.buckets[self.bucket_index(value)];
        while index != NIL {
            let entry = &self.data[index];
            if &entry.value == value {
                return Some(index);
            }
            index = entry.next;
        }
        None
    }

    /// Put a value into the table and return its index.
    ///
    /// If an equal value is already stored, its index is returned and the
    /// table is left unchanged.
    pub fn put(&mut self, value: T) -> usize {
        if let Some(index) = self.find(&value) {
            return index;
        }

        let bucket_index = self.bucket_index(&value);
        let index = self.data.len();
        self.data.push(Entry {
            value,
            next: self.buckets[bucket_index],
        });
        self.buckets[bucket_index] = index;

        if self.data.len() > 2 * self.buckets.len() {
            self.grow();
        }

        index
    }

    /// Double the number of buckets and relink every cell.
    fn grow(&mut self) {
        let size = self.buckets.len() * 2;
        self.buckets.clear();
        self.buckets.resize(size, NIL);
        self.bitmask = (size - 1) as u64;

        for i in 0..self.data.len() {
            let b = self.bucket_index(&self.data[i].value);
            self.data[i].next = self.buckets[b];
            self.buckets[b] = i;
        }
    }
}
