//! In-process doubles for the external collaborators used by the services.

use std::{
    net::IpAddr,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::server::{
    error::AppError,
    service::{
        geolocation::{GeoLocator, GeoLookup},
        notification::PlayerNotifier,
        steam::{ProfileProvider, SteamProfile},
    },
};


/// Canned answer of a `MockGeoLocator`.
enum GeoAnswer {
    Country(&'static str),
    Fail,
    Error,
}

/// `GeoLocator` returning a fixed answer and counting its calls.
pub struct MockGeoLocator {
    answer: GeoAnswer,
    calls: AtomicUsize,
}

impl MockGeoLocator {
    pub fn country(code: &'static str) -> Self {
        Self {
            answer: GeoAnswer::Country(code),
            calls: AtomicUsize::new(0),
        }
    }

    /// Provider answers with `status: "fail"`, as for private ranges.
    pub fn fail() -> Self {
        Self {
            answer: GeoAnswer::Fail,
            calls: AtomicUsize::new(0),
        }
    }

    /// Provider is unreachable.
    pub fn error() -> Self {
        Self {
            answer: GeoAnswer::Error,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeoLocator for MockGeoLocator {
    async fn lookup(&self, _ip: IpAddr) -> Result<GeoLookup, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match self.answer {
            GeoAnswer::Country(code) => Ok(GeoLookup {
                status: "success".to_string(),
                country_code: Some(code.to_string()),
            }),
            GeoAnswer::Fail => Ok(GeoLookup {
                status: "fail".to_string(),
                country_code: None,
            }),
            GeoAnswer::Error => Err(AppError::InternalError(
                "geolocation unavailable".to_string(),
            )),
        }
    }
}

/// `ProfileProvider` serving a single optional profile.
pub struct MockProfileProvider {
    profile: Option<SteamProfile>,
    avatar: Option<Vec<u8>>,
    profile_calls: AtomicUsize,
}

impl MockProfileProvider {
    pub fn with_profile(steam_id: &str, display_name: &str) -> Self {
        Self {
            profile: Some(SteamProfile {
                steam_id: steam_id.to_string(),
                display_name: display_name.to_string(),
                avatar_url: format!("https://avatars.steamstatic.com/{}_full.jpg", steam_id),
            }),
            avatar: Some(vec![0xFF, 0xD8, 0xFF, 0xE0]),
            profile_calls: AtomicUsize::new(0),
        }
    }

    /// Steam knows no profile for any id.
    pub fn without_profile() -> Self {
        Self {
            profile: None,
            avatar: None,
            profile_calls: AtomicUsize::new(0),
        }
    }

    /// Profile resolves but the avatar download fails.
    pub fn failing_avatar(mut self) -> Self {
        self.avatar = None;
        self
    }

    pub fn profile_calls(&self) -> usize {
        self.profile_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileProvider for MockProfileProvider {
    async fn get_profile(&self, steam_id: &str) -> Result<Option<SteamProfile>, AppError> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);

        Ok(self
            .profile
            .clone()
            .filter(|profile| profile.steam_id == steam_id))
    }

    async fn get_avatar(&self, _avatar_url: &str) -> Result<Vec<u8>, AppError> {
        self.avatar
            .clone()
            .ok_or_else(|| AppError::InternalError("avatar download failed".to_string()))
    }
}

/// `PlayerNotifier` forwarding announced ids to a channel.
pub struct MockNotifier {
    sender: mpsc::UnboundedSender<String>,
}

impl MockNotifier {
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<String>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Arc::new(Self { sender }), receiver)
    }
}

#[async_trait]
impl PlayerNotifier for MockNotifier {
    async fn notify_player_created(&self, player_id: &str) -> Result<(), AppError> {
        let _ = self.sender.send(player_id.to_string());
        Ok(())
    }
}
