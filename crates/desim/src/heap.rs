//! # desim::heap
//!
//! An immutable, persistent binomial heap: a forest of binomial trees of
//! strictly increasing rank. Every operation returns a new heap; prior
//! versions remain valid and fully usable (old `BinomialHeap` values are
//! never mutated). Structural sharing is realized through `Rc`-wrapped tree
//! nodes, mirroring the `Rc`-based sharing pattern persistent structures use
//! elsewhere in the retrieved corpus: trees are never mutated in place, and
//! every operation that "changes" a tree allocates a new spine while reusing
//! unchanged `Rc` children.
//!
//! A binomial tree of rank `k` has exactly `2^k` nodes; its children have
//! ranks `k-1, k-2, ..., 0` in that order. Linking two rank-`k` trees yields
//! a rank-`(k+1)` tree. `insert` and `meld` are structured like binary
//! addition over the tree-list, with tree-linking playing the role of
//! carry propagation.

use std::hash::{Hash, Hasher};
use std::rc::Rc;

struct Tree<T> {
    key: T,
    rank: u32,
    /// Children in descending rank order: `children[0]` has rank
    /// `rank - 1`, down to `children[rank - 1]` at rank 0.
    children: Vec<Rc<Tree<T>>>,
}

/// An immutable min-priority queue backed by a binomial heap.
///
/// `T` must be `Ord` (the heap key) and cheap to `Clone` — the natural case
/// when `T` itself wraps its payload in an `Rc`, as `Event<M>` does via its
/// `action` field.
pub struct BinomialHeap<T> {
    /// Root trees in strictly increasing rank order.
    trees: Vec<Rc<Tree<T>>>,
}

impl<T> Clone for BinomialHeap<T> {
    fn clone(&self) -> Self {
        BinomialHeap {
            trees: self.trees.clone(),
        }
    }
}

impl<T> Default for BinomialHeap<T> {
    fn default() -> Self {
        BinomialHeap { trees: Vec::new() }
    }
}

/// Links two rank-`k` trees into a single rank-`(k+1)` tree. The root with
/// the smaller key wins and keeps the other as its new highest-rank child;
/// on a tie, the first argument wins (per the binomial-heap linking
/// contract: ties are broken deterministically in favor of the first
/// operand).
fn link<T: Ord + Clone>(a: Rc<Tree<T>>, b: Rc<Tree<T>>) -> Rc<Tree<T>> {
    debug_assert_eq!(a.rank, b.rank, "link requires equal-rank trees");
    let (winner, loser) = if b.key < a.key { (b, a) } else { (a, b) };
    tracing::trace!(target: "desim::heap", rank = winner.rank, "linking binomial trees");
    let mut children = Vec::with_capacity(winner.children.len() + 1);
    children.push(loser);
    children.extend(winner.children.iter().cloned());
    Rc::new(Tree {
        key: winner.key.clone(),
        rank: winner.rank + 1,
        children,
    })
}

/// Merges two rank-ascending tree lists, propagating carries exactly like
/// binary addition: at each step the minimum rank among the two list heads
/// and any outstanding carry determines whether a tree is emitted as-is,
/// two trees are linked into a new carry, or (when all three coincide) one
/// tree is emitted and the other two are linked into the next carry.
fn meld_trees<T: Ord + Clone>(mut a: &[Rc<Tree<T>>], mut b: &[Rc<Tree<T>>]) -> Vec<Rc<Tree<T>>> {
    let mut out = Vec::new();
    let mut carry: Option<Rc<Tree<T>>> = None;

    loop {
        let a_rank = a.first().map(|t| t.rank);
        let b_rank = b.first().map(|t| t.rank);
        let c_rank = carry.as_ref().map(|t| t.rank);

        let min_rank = match [a_rank, b_rank, c_rank].into_iter().flatten().min() {
            Some(r) => r,
            None => break,
        };

        let a_match = a_rank == Some(min_rank);
        let b_match = b_rank == Some(min_rank);
        let c_match = c_rank == Some(min_rank);

        match (a_match, b_match, c_match) {
            (false, false, false) => unreachable!("min_rank must come from one of the inputs"),
            (true, false, false) => {
                out.push(a[0].clone());
                a = &a[1..];
            }
            (false, true, false) => {
                out.push(b[0].clone());
                b = &b[1..];
            }
            (false, false, true) => {
                out.push(carry.take().expect("c_match implies carry is Some"));
            }
            (true, true, false) => {
                let linked = link(a[0].clone(), b[0].clone());
                a = &a[1..];
                b = &b[1..];
                carry = Some(linked);
            }
            (true, false, true) => {
                let linked = link(a[0].clone(), carry.take().unwrap());
                a = &a[1..];
                carry = Some(linked);
            }
            (false, true, true) => {
                let linked = link(b[0].clone(), carry.take().unwrap());
                b = &b[1..];
                carry = Some(linked);
            }
            (true, true, true) => {
                // Three same-rank trees: one stays at this rank, the other
                // two link into the next carry.
                let surviving_carry = carry.take().unwrap();
                let linked = link(a[0].clone(), b[0].clone());
                out.push(surviving_carry);
                a = &a[1..];
                b = &b[1..];
                carry = Some(linked);
            }
        }
    }

    out
}

impl<T> BinomialHeap<T> {
    /// Returns the empty heap.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether this heap contains no elements.
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}

impl<T: Ord + Clone> BinomialHeap<T> {
    /// Inserts `x`, returning a new heap. Amortized O(1); worst case
    /// O(log n) when a long carry chain propagates.
    pub fn insert(&self, x: T) -> Self {
        let singleton = Rc::new(Tree {
            key: x,
            rank: 0,
            children: Vec::new(),
        });
        BinomialHeap {
            trees: meld_trees(&self.trees, std::slice::from_ref(&singleton)),
        }
    }

    /// Combines two heaps into one containing the union of their elements.
    /// O(log n) in the combined size.
    pub fn meld(&self, other: &Self) -> Self {
        BinomialHeap {
            trees: meld_trees(&self.trees, &other.trees),
        }
    }

    /// Returns the index of the tree whose root is the overall minimum.
    fn min_tree_index(&self) -> Option<usize> {
        self.trees
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.key.cmp(&b.key))
            .map(|(i, _)| i)
    }
}

impl<T: Ord + Clone> BinomialHeap<T> {
    /// Returns the minimum element, if any, without removing it. Θ(log n)
    /// scan of tree roots.
    pub fn minimum(&self) -> Option<T> {
        self.min_tree_index().map(|i| self.trees[i].key.clone())
    }

    /// Returns the minimum element and the heap with it removed. For an
    /// empty heap, returns `(None, self.clone())`. Θ(log n).
    pub fn minimum_remove(&self) -> (Option<T>, Self) {
        let Some(idx) = self.min_tree_index() else {
            return (None, self.clone());
        };

        let min_tree = self.trees[idx].clone();
        let mut remaining: Vec<Rc<Tree<T>>> = self.trees.clone();
        remaining.remove(idx);

        // Children are stored in descending rank order; reverse to get the
        // ascending order `meld_trees` expects.
        let mut orphans: Vec<Rc<Tree<T>>> = min_tree.children.clone();
        orphans.reverse();

        let merged = meld_trees(&remaining, &orphans);
        (Some(min_tree.key.clone()), BinomialHeap { trees: merged })
    }

    /// Drains the heap into its elements in ascending order. Convenience
    /// for tests and for `Hash`; O(n log n).
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut out = Vec::new();
        loop {
            let (min, rest) = self.minimum_remove();
            match min {
                Some(x) => {
                    out.push(x);
                    self = rest;
                }
                None => break,
            }
        }
        out
    }
}

/// Two heaps are equal iff the multiset of elements they contain is equal,
/// regardless of tree shape. Checked recursively via repeated
/// `minimum_remove`: both empty, or the minima agree and the remainders
/// agree. O(n log n) overall, not quadratic.
impl<T: Ord + Clone + PartialEq> PartialEq for BinomialHeap<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self.is_empty(), other.is_empty()) {
            (true, true) => true,
            (true, false) | (false, true) => false,
            (false, false) => {
                let (m1, r1) = self.minimum_remove();
                let (m2, r2) = other.minimum_remove();
                m1 == m2 && r1 == r2
            }
        }
    }
}

impl<T: Ord + Clone + Eq> Eq for BinomialHeap<T> {}

/// Hash is computed over the sorted sequence of elements, so it stays
/// consistent with `PartialEq`'s multiset equality regardless of how each
/// heap's trees happen to be shaped.
impl<T: Ord + Clone + Hash> Hash for BinomialHeap<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut cur = self.clone();
        loop {
            let (min, rest) = cur.minimum_remove();
            match min {
                Some(x) => {
                    x.hash(state);
                    cur = rest;
                }
                None => break,
            }
        }
    }
}

impl<T: std::fmt::Debug + Ord + Clone> std::fmt::Debug for BinomialHeap<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinomialHeap")
            .field("elements", &self.clone().into_sorted_vec())
            .finish()
    }
}
