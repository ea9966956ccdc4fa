extern crate alloc;

use alloc::boxed::Box;
use alloc::fmt;
use core::mem;
use core::ptr::{self, NonNull};

/// A node in the doubly linked list.
///
/// Contains a value and pointers to the previous and next entries.
/// This structure is not meant to be used directly by users of the `List`.
pub struct Entry<T> {
    /// The value stored in this entry. Uses MaybeUninit to allow for sigil nodes.
    val: mem::MaybeUninit<T>,
    /// Pointer to the previous entry in the list.
    prev: *mut Entry<T>,
    /// Pointer to the next entry in the list.
    next: *mut Entry<T>,
}

impl<T> Entry<T> {
    /// Creates a new entry with the given value.
    fn new(val: T) -> Self {
        Entry {
            val: mem::MaybeUninit::new(val),
            prev: ptr::null_mut(),
            next: ptr::null_mut(),
        }
    }

    /// Creates a new sigil (sentinel) entry without initializing the value.
    ///
    /// Sigil entries are used as head and tail markers in the list.
    fn new_sigil() -> Self {
        Entry {
            val: mem::MaybeUninit::uninit(),
            prev: ptr::null_mut(),
            next: ptr::null_mut(),
        }
    }

    /// Extracts a shared reference to the value in this entry.
    ///
    /// # Safety
    ///
    /// The value must be initialized, i.e. this must not be a sigil node.
    pub unsafe fn get_value(&self) -> &T {
        self.val.assume_init_ref()
    }

    /// Extracts a mutable reference to the value in this entry.
    ///
    /// # Safety
    ///
    /// The value must be initialized, i.e. this must not be a sigil node.
    pub unsafe fn get_value_mut(&mut self) -> &mut T {
        self.val.assume_init_mut()
    }

    /// Consumes a detached entry and returns the value it held.
    ///
    /// # Safety
    ///
    /// The entry must hold an initialized value and must already be detached
    /// from any list (e.g. returned by `remove_first`/`remove_last`/`remove`).
    pub unsafe fn into_value(self: Box<Self>) -> T {
        self.val.assume_init()
    }
}

/// A doubly linked list with stable node addresses.
///
/// Nodes are individually heap-allocated and linked between two sentinel
/// entries, so a `*mut Entry<T>` handle stays valid across reordering and
/// cross-list transfers until the node is removed. The replacement policies
/// store these handles in their key maps; capacity enforcement is theirs,
/// the list only tracks membership.
pub struct List<T> {
    /// Current number of items in the list.
    len: usize,
    /// Pointer to the head sentinel node.
    head: *mut Entry<T>,
    /// Pointer to the tail sentinel node.
    tail: *mut Entry<T>,
}

impl<T> List<T> {
    /// Creates a new, empty list.
    pub fn new() -> List<T> {
        let head = Box::into_raw(Box::new(Entry::new_sigil()));
        let tail = Box::into_raw(Box::new(Entry::new_sigil()));

        let list = List { len: 0, head, tail };

        unsafe {
            // SAFETY: head and tail are newly allocated and valid pointers
            (*list.head).next = list.tail;
            (*list.tail).prev = list.head;
        }

        list
    }

    /// Returns the current number of items in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list contains no items.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a pointer to the first (most recently attached) node,
    /// or null if the list is empty.
    pub fn front_node(&self) -> *mut Entry<T> {
        if self.is_empty() {
            return ptr::null_mut();
        }
        // SAFETY: head is a valid sentinel and the list is non-empty
        unsafe { (*self.head).next }
    }

    /// Returns a pointer to the last (oldest) node, or null if the list
    /// is empty.
    pub fn back_node(&self) -> *mut Entry<T> {
        if self.is_empty() {
            return ptr::null_mut();
        }
        // SAFETY: tail is a valid sentinel and the list is non-empty
        unsafe { (*self.tail).prev }
    }

    /// Returns the successor of `node`, or null if `node` is the last item.
    ///
    /// # Safety
    ///
    /// `node` must be a valid pointer to a non-sigil entry in this list.
    pub unsafe fn next_node(&self, node: *mut Entry<T>) -> *mut Entry<T> {
        let next = (*node).next;
        if next == self.tail {
            ptr::null_mut()
        } else {
            next
        }
    }

    /// Adds a value to the front of the list and returns its node.
    pub fn add_front(&mut self, v: T) -> *mut Entry<T> {
        // SAFETY: Box::into_raw always yields a non-null pointer
        let node = unsafe { NonNull::new_unchecked(Box::into_raw(Box::new(Entry::new(v)))) };
        // SAFETY: node is a newly allocated entry that is not part of any list yet
        unsafe { self.attach(node.as_ptr()) };
        self.len += 1;
        node.as_ptr()
    }

    /// Adds a value to the back of the list and returns its node.
    pub fn add_back(&mut self, v: T) -> *mut Entry<T> {
        // SAFETY: Box::into_raw always yields a non-null pointer
        let node = unsafe { NonNull::new_unchecked(Box::into_raw(Box::new(Entry::new(v)))) };
        // SAFETY: node is a newly allocated entry that is not part of any list yet
        unsafe { self.attach_last(node.as_ptr()) };
        self.len += 1;
        node.as_ptr()
    }

    /// Inserts a value directly after `node` and returns the new node.
    ///
    /// # Safety
    ///
    /// `node` must be a valid pointer to a non-sigil entry in this list.
    pub unsafe fn insert_after(&mut self, node: *mut Entry<T>, v: T) -> *mut Entry<T> {
        let new = Box::into_raw(Box::new(Entry::new(v)));
        (*new).prev = node;
        (*new).next = (*node).next;
        (*(*node).next).prev = new;
        (*node).next = new;
        self.len += 1;
        new
    }

    /// Removes the first item from the list, returning the detached entry.
    pub fn remove_first(&mut self) -> Option<Box<Entry<T>>> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the list is non-empty, so head.next is a real node
        let next = unsafe { (*self.head).next };
        if next != self.tail {
            unsafe {
                self.detach(next);
            }
            self.len -= 1;
            // SAFETY: next was just detached and originated from Box::into_raw
            unsafe { Some(Box::from_raw(next)) }
        } else {
            None
        }
    }

    /// Removes the last item from the list, returning the detached entry.
    pub fn remove_last(&mut self) -> Option<Box<Entry<T>>> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the list is non-empty, so tail.prev is a real node
        let prev = unsafe { (*self.tail).prev };
        if prev != self.head {
            unsafe {
                self.detach(prev);
            }
            self.len -= 1;
            // SAFETY: prev was just detached and originated from Box::into_raw
            unsafe { Some(Box::from_raw(prev)) }
        } else {
            None
        }
    }

    /// Detaches `node` from the list and returns it as a Box.
    ///
    /// # Safety
    ///
    /// `node` must be a valid pointer to a non-sigil entry that is part of
    /// this list (not null, not freed, not owned by another list).
    pub unsafe fn remove(&mut self, node: *mut Entry<T>) -> Option<Box<Entry<T>>> {
        if self.is_empty() || node.is_null() || node == self.head || node == self.tail {
            return None;
        }

        // SAFETY: caller guarantees node is a live member of this list
        self.detach(node);
        self.len -= 1;
        Some(Box::from_raw(node))
    }

    /// Unlinks a node from its neighbours without deallocating it.
    ///
    /// # Safety
    ///
    /// `node` must be a valid pointer to a linked, non-sigil entry.
    unsafe fn detach(&mut self, node: *mut Entry<T>) {
        (*(*node).prev).next = (*node).next;
        (*(*node).next).prev = (*node).prev;
    }

    /// Links a detached node in right after the head sentinel.
    ///
    /// # Safety
    ///
    /// `node` must be valid and must not currently be linked into any list.
    unsafe fn attach(&mut self, node: *mut Entry<T>) {
        (*node).next = (*self.head).next;
        (*node).prev = self.head;
        (*self.head).next = node;
        (*(*node).next).prev = node;
    }

    /// Links a detached node in right before the tail sentinel.
    ///
    /// # Safety
    ///
    /// `node` must be valid and must not currently be linked into any list.
    unsafe fn attach_last(&mut self, node: *mut Entry<T>) {
        (*node).next = self.tail;
        (*node).prev = (*self.tail).prev;
        (*self.tail).prev = node;
        (*(*node).prev).next = node;
    }

    /// Attaches a node taken from another list to the front of this one.
    ///
    /// Unlike `attach`, this accounts for the gained node in `len`. The
    /// usual flow is `other.remove(node)` followed by
    /// `this.attach_from_other_list(Box::into_raw(entry))`, which preserves
    /// the node address that key maps hold.
    ///
    /// # Safety
    ///
    /// `node` must be valid and detached (not linked into any list).
    pub unsafe fn attach_from_other_list(&mut self, node: *mut Entry<T>) {
        self.attach(node);
        self.len += 1;
    }

    /// Attaches a node taken from another list to the back of this one.
    ///
    /// # Safety
    ///
    /// `node` must be valid and detached (not linked into any list).
    pub unsafe fn attach_last_from_other_list(&mut self, node: *mut Entry<T>) {
        self.attach_last(node);
        self.len += 1;
    }

    /// Moves a node to the front of the list.
    ///
    /// # Safety
    ///
    /// `node` must be a valid pointer to an entry in this list.
    pub unsafe fn move_to_front(&mut self, node: *mut Entry<T>) {
        if node.is_null() || node == self.head || node == self.tail {
            return;
        }

        if (*self.head).next == node {
            return;
        }

        self.detach(node);
        self.attach(node);
    }

    /// Moves a node to the back of the list.
    ///
    /// # Safety
    ///
    /// `node` must be a valid pointer to an entry in this list.
    pub unsafe fn move_to_back(&mut self, node: *mut Entry<T>) {
        if node.is_null() || node == self.head || node == self.tail {
            return;
        }

        if (*self.tail).prev == node {
            return;
        }

        self.detach(node);
        self.attach_last(node);
    }

    /// Clears the list, removing and dropping all entries.
    pub fn clear(&mut self) {
        while self.remove_first().is_some() {}
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        List::new()
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();

        // SAFETY: head and tail were allocated in `new` and are only freed here
        unsafe {
            if !self.head.is_null() {
                let _ = Box::from_raw(self.head);
                self.head = ptr::null_mut();
            }
            if !self.tail.is_null() {
                let _ = Box::from_raw(self.tail);
                self.tail = ptr::null_mut();
            }
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List").field("length", &self.len).finish()
    }
}
