use hbfs_core::ActionSequence;

#[test]
fn drains_in_execution_order() {
    let mut seq = ActionSequence::new(vec!['a', 'b', 'c']);
    assert_eq!(seq.len(), 3);
    assert_eq!(seq.peek_next(), Some(&'a'));

    assert_eq!(seq.pop_next(), Some('a'));
    assert_eq!(seq.pop_next(), Some('b'));
    assert_eq!(seq.pop_next(), Some('c'));
    assert_eq!(seq.pop_next(), None);
    assert!(seq.is_empty());
}

#[test]
fn single_and_empty() {
    let mut one = ActionSequence::single(7u8);
    assert_eq!(one.len(), 1);
    assert_eq!(one.pop_next(), Some(7));
    assert!(one.is_empty());

    let none = ActionSequence::<u8>::empty();
    assert!(none.is_empty());
    assert_eq!(none, ActionSequence::default());
}

#[test]
fn collects_from_iterator() {
    let seq: ActionSequence<u32> = (1..=4).collect();
    assert_eq!(seq.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
}
