//! 歌单存储。所有修改操作都先做所有权校验。

use dashmap::DashMap;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{QrLoginError, Result};

/// 一个歌单。
#[derive(Debug, Clone, Serialize)]
pub struct Playlist {
    /// 歌单的唯一 ID。
    pub id: String,
    /// 所有者的用户 ID。
    pub user_id: String,
    /// 歌单名。
    pub name: String,
    /// 歌曲 ID 列表，按加入顺序。
    pub songs: Vec<String>,
}

/// 进程内的歌单存储。
#[derive(Debug, Default)]
pub struct PlaylistStore {
    playlists: DashMap<String, Playlist>,
}

impl PlaylistStore {
    /// 创建一个空的歌单存储。
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 为用户创建一个空歌单。
    pub fn create(&self, user_id: &str, name: &str) -> Playlist {
        let playlist = Playlist {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            songs: Vec::new(),
        };
        self.playlists.insert(playlist.id.clone(), playlist.clone());
        playlist
    }

    /// 按 ID 查找歌单。
    #[must_use]
    pub fn get(&self, playlist_id: &str) -> Option<Playlist> {
        self.playlists.get(playlist_id).map(|p| p.value().clone())
    }

    /// 列出用户的全部歌单。
    #[must_use]
    pub fn list_by_user(&self, user_id: &str) -> Vec<Playlist> {
        self.playlists
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// 重命名歌单。只有所有者可以操作。
    pub fn rename(&self, playlist_id: &str, calling_user_id: &str, new_name: &str) -> Result<Playlist> {
        let mut playlist = self.get_owned_mut(playlist_id, calling_user_id)?;
        playlist.name = new_name.to_string();
        Ok(playlist.value().clone())
    }

    /// 删除歌单。只有所有者可以操作。
    pub fn delete(&self, playlist_id: &str, calling_user_id: &str) -> Result<()> {
        // 先校验所有权，再删除
        self.get_owned_mut(playlist_id, calling_user_id)?;
        self.playlists.remove(playlist_id);
        Ok(())
    }

    /// 往歌单里加一首歌。重复加入保持幂等。
    pub fn add_song(&self, playlist_id: &str, calling_user_id: &str, song_id: &str) -> Result<()> {
        let mut playlist = self.get_owned_mut(playlist_id, calling_user_id)?;
        if !playlist.songs.iter().any(|s| s == song_id) {
            playlist.songs.push(song_id.to_string());
        }
        Ok(())
    }

    /// 从歌单里移除一首歌。
    pub fn remove_song(
        &self,
        playlist_id: &str,
        calling_user_id: &str,
        song_id: &str,
    ) -> Result<()> {
        let mut playlist = self.get_owned_mut(playlist_id, calling_user_id)?;
        playlist.songs.retain(|s| s != song_id);
        Ok(())
    }

    /// 取出歌单的可变引用，校验调用者就是所有者。
    fn get_owned_mut(
        &self,
        playlist_id: &str,
        calling_user_id: &str,
    ) -> Result<dashmap::mapref::one::RefMut<'_, String, Playlist>> {
        let playlist = self
            .playlists
            .get_mut(playlist_id)
            .ok_or_else(|| QrLoginError::StoreNotFound(format!("歌单 {playlist_id}")))?;
        if playlist.user_id != calling_user_id {
            return Err(QrLoginError::NotPlaylistOwner {
                playlist_id: playlist_id.to_string(),
                user_id: calling_user_id.to_string(),
            });
        }
        Ok(playlist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_song_crud() {
        let store = PlaylistStore::new();
        let playlist = store.create("u1", "开车歌单");

        store.add_song(&playlist.id, "u1", "song-a").unwrap();
        store.add_song(&playlist.id, "u1", "song-b").unwrap();
        store.add_song(&playlist.id, "u1", "song-a").unwrap();
        assert_eq!(store.get(&playlist.id).unwrap().songs, vec!["song-a", "song-b"]);

        store.remove_song(&playlist.id, "u1", "song-a").unwrap();
        assert_eq!(store.get(&playlist.id).unwrap().songs, vec!["song-b"]);
    }

    #[test]
    fn test_ownership_guard_blocks_foreign_mutation() {
        let store = PlaylistStore::new();
        let playlist = store.create("owner", "私人歌单");

        let err = store.rename(&playlist.id, "intruder", "改名").unwrap_err();
        assert!(matches!(err, QrLoginError::NotPlaylistOwner { .. }));

        let err = store.delete(&playlist.id, "intruder").unwrap_err();
        assert!(matches!(err, QrLoginError::NotPlaylistOwner { .. }));

        // 歌单毫发无损
        let unchanged = store.get(&playlist.id).unwrap();
        assert_eq!(unchanged.name, "私人歌单");
    }

    #[test]
    fn test_rename_and_delete_by_owner() {
        let store = PlaylistStore::new();
        let playlist = store.create("u1", "旧名字");

        let renamed = store.rename(&playlist.id, "u1", "新名字").unwrap();
        assert_eq!(renamed.name, "新名字");

        store.delete(&playlist.id, "u1").unwrap();
        assert!(store.get(&playlist.id).is_none());
    }

    #[test]
    fn test_missing_playlist() {
        let store = PlaylistStore::new();
        let err = store.rename("不存在", "u1", "x").unwrap_err();
        assert!(matches!(err, QrLoginError::StoreNotFound(_)));
    }
}
