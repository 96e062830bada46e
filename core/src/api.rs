use reqwest::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    Client, RequestBuilder, Response,
};
use serde_json::Value;
use tracing::{debug, error};
use url::Url;

use crate::{
    model::{Song, SongDraft},
    session::SessionProvider,
};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("server answered {status}")]
    Status { status: u16, payload: Option<Value> },
    #[error(transparent)]
    BaseUrl(#[from] url::ParseError),
    #[error("{0} cannot take a song id as path segment")]
    NotABase(Url),
}

impl ApiError {
    /// Structured body the server sent along with a failure, if any.
    pub fn payload(&self) -> Option<&Value> {
        match self {
            ApiError::Status { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }

    pub fn log(&self, op: &str) {
        match self.payload() {
            Some(payload) => error!(%payload, "{op} failed: {}", self),
            None => error!("{op} failed: {}", self),
        }
    }
}

/// Remote side of the songs resource.
///
/// Futures are not `Send`, the browser client is single threaded.
#[allow(async_fn_in_trait)]
pub trait SongApi {
    async fn list(&self) -> Result<Vec<Song>, ApiError>;
    async fn create(&self, draft: &SongDraft) -> Result<Song, ApiError>;
    async fn update(&self, song: &Song) -> Result<Song, ApiError>;
    async fn delete(&self, id: &str) -> Result<(), ApiError>;
}

impl<A: SongApi + ?Sized> SongApi for &A {
    async fn list(&self) -> Result<Vec<Song>, ApiError> {
        (**self).list().await
    }
    async fn create(&self, draft: &SongDraft) -> Result<Song, ApiError> {
        (**self).create(draft).await
    }
    async fn update(&self, song: &Song) -> Result<Song, ApiError> {
        (**self).update(song).await
    }
    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        (**self).delete(id).await
    }
}

/// [`SongApi`] over plain HTTP + JSON.
#[derive(Clone, Debug)]
pub struct HttpSongApi<S> {
    client: Client,
    base: Url,
    session: S,
}

impl<S: SessionProvider> HttpSongApi<S> {
    pub fn new(base_url: impl AsRef<str>, session: S) -> Result<Self, ApiError> {
        Self::with_client(Client::new(), base_url, session)
    }

    pub fn with_client(
        client: Client,
        base_url: impl AsRef<str>,
        session: S,
    ) -> Result<Self, ApiError> {
        let base_url = base_url.as_ref();
        let base: Url = base_url.strip_suffix('/').unwrap_or(base_url).parse()?;
        if base.cannot_be_a_base() {
            return Err(ApiError::NotABase(base));
        }
        Ok(Self {
            client,
            base,
            session,
        })
    }

    fn item_url(&self, id: &str) -> Url {
        let mut url = self.base.clone();
        // checked in the constructor
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(id);
        }
        url
    }

    // token is looked up per request, never cached
    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match self.session.current_token() {
            Some(token) => req.header(AUTHORIZATION, token),
            None => req,
        }
    }
}

async fn check(res: Response) -> Result<Response, ApiError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let payload = res.json::<Value>().await.ok();
    Err(ApiError::Status {
        status: status.as_u16(),
        payload,
    })
}

impl<S: SessionProvider> SongApi for HttpSongApi<S> {
    async fn list(&self) -> Result<Vec<Song>, ApiError> {
        debug!("GET {}", self.base);
        let res = self
            .authorize(self.client.get(self.base.clone()))
            .send()
            .await?;
        Ok(check(res).await?.json().await?)
    }

    async fn create(&self, draft: &SongDraft) -> Result<Song, ApiError> {
        debug!("POST {}", self.base);
        let res = self
            .authorize(self.client.post(self.base.clone()))
            .header(CONTENT_TYPE, "application/json")
            .json(draft)
            .send()
            .await?;
        Ok(check(res).await?.json().await?)
    }

    async fn update(&self, song: &Song) -> Result<Song, ApiError> {
        let url = self.item_url(song.id());
        debug!("PUT {url}");
        let res = self
            .authorize(self.client.put(url))
            .header(CONTENT_TYPE, "application/json")
            .json(song)
            .send()
            .await?;
        Ok(check(res).await?.json().await?)
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let url = self.item_url(id);
        debug!("DELETE {url}");
        let res = self
            .authorize(self.client.delete(url))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;
        check(res).await?;
        Ok(())
    }
}
