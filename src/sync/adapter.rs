//! Glue between the engine and the shared document store.
//!
//! Every mutation follows the same shape: read the document with its
//! version, run a pure transition in memory and write the whole result
//! back conditioned on that version. A concurrent writer surfaces as
//! [`StoreError::VersionConflict`], which is passed through untouched;
//! the caller decides whether to re-read and resubmit.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::broadcast;
use tracing::{debug, instrument};

use crate::game::{Game, GameAction, Phase, Seat};
use crate::lobby::{Lobby, LobbyStatus, PlayerInfo};
use crate::shared::GameError;
use crate::store::{DocumentChange, DocumentStore, StoreError};
use crate::sync::GameDocument;

pub struct GameSync<S: DocumentStore> {
    store: Arc<S>,
}

fn lobby_path(code: &str) -> String {
    format!("lobbies/{code}")
}

fn game_path(code: &str) -> String {
    format!("lobbies/{code}/game")
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<Value, GameError> {
    serde_json::to_value(value).map_err(|e| GameError::InvalidDocument(e.to_string()))
}

fn from_value<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, GameError> {
    serde_json::from_value(value).map_err(|e| GameError::InvalidDocument(e.to_string()))
}

impl<S: DocumentStore> GameSync<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Creates a fresh lobby document with the caller as host at seat 0.
    #[instrument(skip(self))]
    pub async fn create_lobby(&self, host_name: &str) -> Result<Lobby, GameError> {
        let lobby = Lobby::new(host_name);
        self.store
            .write(vec![(lobby_path(&lobby.code), to_value(&lobby)?)])
            .await?;
        self.register_presence(&lobby.code, lobby.host).await?;
        debug!(code = %lobby.code, "lobby created");
        Ok(lobby)
    }

    /// Seats a player at the first free seat of an existing lobby.
    #[instrument(skip(self))]
    pub async fn join_lobby(&self, code: &str, name: &str) -> Result<(Lobby, Seat), GameError> {
        let (mut lobby, version) = self.read_lobby(code).await?;
        let seat = lobby
            .join(name)
            .ok_or_else(|| GameError::LobbyFull(code.to_string()))?;

        let player = PlayerInfo {
            name: name.to_string(),
            connected: true,
        };
        self.store
            .write_if_version(
                &lobby_path(code),
                version,
                vec![(
                    format!("lobbies/{code}/players/{}", seat.index()),
                    to_value(&player)?,
                )],
            )
            .await?;
        self.register_presence(code, seat).await?;
        Ok((lobby, seat))
    }

    /// Deals round one and flips the lobby to playing. Requires all four
    /// seats to be taken.
    #[instrument(skip(self))]
    pub async fn start_game(&self, code: &str) -> Result<Game, GameError> {
        let (lobby, version) = self.read_lobby(code).await?;
        if !lobby.is_full() {
            return Err(GameError::LobbyNotReady(code.to_string()));
        }

        let game = Game::new_game(&mut rand::rng())?;
        let doc = GameDocument::from(&game);
        self.store
            .write_if_version(
                &lobby_path(code),
                version,
                vec![
                    (
                        format!("lobbies/{code}/status"),
                        to_value(&LobbyStatus::Playing)?,
                    ),
                    (game_path(code), to_value(&doc)?),
                ],
            )
            .await?;
        Ok(game)
    }

    /// Applies one action to the shared game and writes the result back.
    ///
    /// The whole game document is rewritten as a unit, so a retried or
    /// duplicated no-op action (a second `CompleteTrick`, say) rewrites
    /// an identical document instead of corrupting anything.
    #[instrument(skip(self))]
    pub async fn submit(&self, code: &str, action: GameAction) -> Result<Game, GameError> {
        let (value, version) = self.store.read_with_version(&game_path(code)).await?;
        let value = value.ok_or_else(|| GameError::DocumentNotFound(game_path(code)))?;
        let doc: GameDocument = from_value(value)?;
        let mut game = Game::try_from(doc)?;

        game.apply(action, &mut rand::rng())?;

        let mut updates = vec![(game_path(code), to_value(&GameDocument::from(&game))?)];
        if game.phase == Phase::GameEnd {
            updates.push((
                format!("lobbies/{code}/status"),
                to_value(&LobbyStatus::Finished)?,
            ));
        }
        self.store
            .write_if_version(&lobby_path(code), version, updates)
            .await?;
        Ok(game)
    }

    /// Current game state, straight from the store.
    pub async fn read_game(&self, code: &str) -> Result<Game, GameError> {
        let value = self
            .store
            .read(&game_path(code))
            .await?
            .ok_or_else(|| GameError::DocumentNotFound(game_path(code)))?;
        let doc: GameDocument = from_value(value)?;
        Game::try_from(doc)
    }

    /// Change feed for everything under the lobby document.
    pub async fn watch(&self, code: &str) -> broadcast::Receiver<DocumentChange> {
        self.store.subscribe(&lobby_path(code)).await
    }

    /// Marks a player disconnected without vacating the seat.
    #[instrument(skip(self))]
    pub async fn mark_disconnected(&self, code: &str, seat: Seat) -> Result<(), GameError> {
        self.store
            .write(vec![(presence_path(code, seat), Value::Bool(false))])
            .await?;
        Ok(())
    }

    async fn read_lobby(&self, code: &str) -> Result<(Lobby, u64), GameError> {
        let (value, version) = self.store.read_with_version(&lobby_path(code)).await?;
        let value = value.ok_or_else(|| GameError::DocumentNotFound(lobby_path(code)))?;
        Ok((from_value(value)?, version))
    }

    /// Arms the server-side fallback that flags this seat disconnected if
    /// the client drops without saying goodbye.
    async fn register_presence(&self, code: &str, seat: Seat) -> Result<(), StoreError> {
        self.store
            .on_disconnect_cleanup(&presence_path(code, seat), Value::Bool(false))
            .await
    }
}

fn presence_path(code: &str, seat: Seat) -> String {
    format!("lobbies/{code}/players/{}/connected", seat.index())
}
