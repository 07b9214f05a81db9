use rb_tree_map::{RbTree, TreeError};

fn main() {
    let mut tree = RbTree::new();
    for (key, value) in [(5, "five"), (3, "three"), (8, "eight"), (1, "one"), (4, "four")] {
        let flips = tree.insert(key, value).unwrap();
        println!("insert {key}: {flips} color changes");
    }
    assert_eq!(tree.insert(3, "tres"), Err(TreeError::DuplicateKey));

    println!("keys   {:?}", tree.keys_to_array());
    println!("values {:?}", tree.values_to_array());
    println!("min {:?}, max {:?}", tree.min(), tree.max());

    let flips = tree.delete(&5).unwrap();
    println!("delete 5: {flips} color changes");
    assert_eq!(tree.delete(&5), Err(TreeError::KeyNotFound));
    assert_eq!(tree.search(&4), Some("four"));
    assert_eq!(tree.keys_to_array(), vec![1, 3, 4, 8]);
}
