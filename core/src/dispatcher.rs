//! Full round-trips: build the request, execute it, parse the response and
//! commit the result into a slice.
//!
//! Every operation both records its failure in the slice (for views that
//! render `error`) and returns it (for callers that show a notification).

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::media::MediaResolver;
use crate::resources::{Resource, Retrievable, SingletonResource};
use crate::state::{Outcome, SingletonSlice, Slice};
use crate::transport::Transport;

pub struct Dispatcher<T> {
    client: ApiClient,
    media: MediaResolver,
    transport: T,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(config: &ClientConfig, transport: T) -> Self {
        Self {
            client: ApiClient::new(&config.api_base_url),
            media: MediaResolver::new(&config.media_base_url),
            transport,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn media(&self) -> &MediaResolver {
        &self.media
    }

    pub fn fetch_all<R: Resource>(&self, slice: &mut Slice<R>, filter: Option<&R::Filter>) -> Result<Outcome, ApiError> {
        let ticket = slice.begin_fetch_all();
        let result = self
            .transport
            .execute(self.client.build_get_all::<R>(filter))
            .and_then(|response| self.client.parse_list::<R>(response));
        match result {
            Ok(records) => Ok(slice.fulfill_fetch_all(ticket, records, &self.media)),
            Err(err) => {
                slice.reject(ticket, &err);
                Err(err)
            }
        }
    }

    /// Loads one record without touching any slice.
    pub fn fetch_by_id<R: Retrievable>(&self, id: R::Id) -> Result<R, ApiError> {
        let response = self.transport.execute(self.client.build_get_by_id::<R>(id))?;
        let mut record = self.client.parse_record::<R>(response)?;
        record.normalize_media(&self.media);
        Ok(record)
    }

    pub fn create<R: Resource>(&self, slice: &mut Slice<R>, draft: &R::Draft) -> Result<Outcome, ApiError> {
        let ticket = slice.begin_create();
        let result = self
            .client
            .build_create::<R>(draft)
            .and_then(|request| self.transport.execute(request))
            .and_then(|response| self.client.parse_record::<R>(response));
        match result {
            Ok(record) => Ok(slice.fulfill_create(ticket, record, &self.media)),
            Err(err) => {
                slice.reject(ticket, &err);
                Err(err)
            }
        }
    }

    pub fn update<R: Resource>(&self, slice: &mut Slice<R>, id: R::Id, draft: &R::Draft) -> Result<Outcome, ApiError> {
        let ticket = slice.begin_update(id);
        let result = self
            .client
            .build_update::<R>(id, draft)
            .and_then(|request| self.transport.execute(request))
            .and_then(|response| self.client.parse_record::<R>(response));
        match result {
            Ok(record) => Ok(slice.fulfill_update(ticket, record, &self.media)),
            Err(err) => {
                slice.reject(ticket, &err);
                Err(err)
            }
        }
    }

    pub fn delete<R: Resource>(&self, slice: &mut Slice<R>, id: R::Id) -> Result<Outcome, ApiError> {
        let ticket = slice.begin_delete();
        let result = self
            .transport
            .execute(self.client.build_delete::<R>(id))
            .and_then(|response| self.client.parse_delete(response));
        match result {
            Ok(()) => Ok(slice.fulfill_delete(ticket, id)),
            Err(err) => {
                slice.reject(ticket, &err);
                Err(err)
            }
        }
    }

    pub fn fetch_singleton<S: SingletonResource>(&self, slot: &mut SingletonSlice<S>) -> Result<Outcome, ApiError> {
        let ticket = slot.begin_fetch();
        let result = self
            .transport
            .execute(self.client.build_get_singleton::<S>())
            .and_then(|response| self.client.parse_singleton::<S>(response));
        match result {
            Ok(record) => Ok(slot.fulfill(ticket, record, &self.media)),
            Err(err) => {
                slot.reject(ticket, &err);
                Err(err)
            }
        }
    }

    pub fn update_singleton<S: SingletonResource>(
        &self,
        slot: &mut SingletonSlice<S>,
        draft: &S::Draft,
    ) -> Result<Outcome, ApiError> {
        let ticket = slot.begin_update();
        let result = self
            .client
            .build_update_singleton::<S>(draft)
            .and_then(|request| self.transport.execute(request))
            .and_then(|response| self.client.parse_singleton::<S>(response));
        match result {
            Ok(record) => Ok(slot.fulfill(ticket, record, &self.media)),
            Err(err) => {
                slot.reject(ticket, &err);
                Err(err)
            }
        }
    }
}
