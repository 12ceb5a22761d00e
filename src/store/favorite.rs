//! 以 (用户, 歌曲) 为键的收藏存储。

use dashmap::DashMap;

/// 进程内的收藏存储。每个用户的收藏按加入顺序保存。
#[derive(Debug, Default)]
pub struct FavoriteStore {
    favorites: DashMap<String, Vec<String>>,
}

impl FavoriteStore {
    /// 创建一个空的收藏存储。
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 把歌曲加入用户的收藏。
    ///
    /// 幂等：已收藏时不重复加入，返回 `false`。
    pub fn add(&self, user_id: &str, song_id: &str) -> bool {
        let mut songs = self.favorites.entry(user_id.to_string()).or_default();
        if songs.iter().any(|s| s == song_id) {
            return false;
        }
        songs.push(song_id.to_string());
        true
    }

    /// 把歌曲移出用户的收藏，返回是否确实删除了。
    pub fn remove(&self, user_id: &str, song_id: &str) -> bool {
        let Some(mut songs) = self.favorites.get_mut(user_id) else {
            return false;
        };
        let before = songs.len();
        songs.retain(|s| s != song_id);
        songs.len() != before
    }

    /// 列出用户收藏的全部歌曲 ID，按加入顺序。
    #[must_use]
    pub fn list(&self, user_id: &str) -> Vec<String> {
        self.favorites
            .get(user_id)
            .map(|songs| songs.value().clone())
            .unwrap_or_default()
    }

    /// 判断歌曲是否在用户的收藏里。
    #[must_use]
    pub fn contains(&self, user_id: &str, song_id: &str) -> bool {
        self.favorites
            .get(user_id)
            .is_some_and(|songs| songs.iter().any(|s| s == song_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_is_idempotent() {
        let store = FavoriteStore::new();
        assert!(store.add("u1", "song-a"));
        assert!(!store.add("u1", "song-a"));
        assert_eq!(store.list("u1"), vec!["song-a"]);
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let store = FavoriteStore::new();
        store.add("u1", "c");
        store.add("u1", "a");
        store.add("u1", "b");
        assert_eq!(store.list("u1"), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_remove() {
        let store = FavoriteStore::new();
        store.add("u1", "a");
        store.add("u1", "b");
        assert!(store.remove("u1", "a"));
        assert!(!store.remove("u1", "a"));
        assert!(!store.remove("别人", "a"));
        assert_eq!(store.list("u1"), vec!["b"]);
    }

    #[test]
    fn test_users_are_isolated() {
        let store = FavoriteStore::new();
        store.add("u1", "a");
        store.add("u2", "b");
        assert!(store.contains("u1", "a"));
        assert!(!store.contains("u2", "a"));
    }
}
