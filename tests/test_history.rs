use crop_editor::modules::image_editor::HistoryStack;

#[test]
fn test_empty_history_cannot_undo() {
    let mut h: HistoryStack<u32> = HistoryStack::new();
    assert!(h.is_empty());
    assert!(!h.can_undo());
    assert!(!h.undo());
    assert_eq!(h.current(), None);
    assert_eq!(h.previous(), None);
}

#[test]
fn test_undo_never_drops_original() {
    let mut h = HistoryStack::new();
    h.reset(1);
    h.push(2);
    h.push(3);
    assert_eq!(h.len(), 3);
    assert_eq!(h.previous(), Some(&2));

    assert!(h.undo());
    assert_eq!(h.current(), Some(&2));
    assert!(h.undo());
    assert_eq!(h.current(), Some(&1));
    assert!(!h.undo());
    assert_eq!(h.current(), Some(&1));
    assert_eq!(h.len(), 1);
}

#[test]
fn test_reset_discards_previous_entries() {
    let mut h = HistoryStack::new();
    h.reset("a");
    h.push("b");
    h.reset("c");
    assert_eq!(h.len(), 1);
    assert_eq!(h.iter().copied().collect::<Vec<_>>(), vec!["c"]);
    assert!(!h.can_undo());
}

#[test]
fn test_clear() {
    let mut h = HistoryStack::new();
    h.reset(0u8);
    h.push(1);
    h.clear();
    assert!(h.is_empty());
}
