//! The profile view.

use std::sync::Arc;

use kabphone_cache::{Mutation, QueryEntry, QueryObserver, QueryOptions, keys, query_fn};
use kabphone_client::UserApi;
use kabphone_core::error::ErrorInfo;
use kabphone_core::result::AppResult;
use kabphone_core::types::MessageBody;
use kabphone_entity::user::{UpdateProfileRequest, User};

use crate::context::{ServiceContext, display_message};

/// Shows and edits the signed-in user's profile.
#[derive(Debug)]
pub struct ProfileView {
    ctx: ServiceContext,
    observer: QueryObserver,
    update: Mutation<UpdateProfileRequest, MessageBody>,
}

impl ProfileView {
    /// Mount the view. Must be called from within a Tokio runtime.
    pub fn new(ctx: ServiceContext, users: UserApi) -> Self {
        let observer = {
            let users = users.clone();
            ctx.cache.observe(
                keys::profile(),
                query_fn(move || {
                    let users = users.clone();
                    async move { users.profile().await }
                }),
                QueryOptions::default(),
            )
        };

        let update = {
            let cache = ctx.cache.clone();
            let ok = Arc::clone(&ctx.notifier);
            let failed = Arc::clone(&ctx.notifier);
            Mutation::new(move |request: UpdateProfileRequest| {
                let users = users.clone();
                async move { users.update_profile(&request).await }
            })
            .on_success(move |_, _| {
                cache.invalidate(&keys::profile());
                ok.success("Profile updated successfully");
            })
            .on_error(move |error: &ErrorInfo, _| {
                failed.error(&display_message(error, "Failed to update profile"));
            })
        };

        Self {
            ctx,
            observer,
            update,
        }
    }

    /// The profile entry.
    pub fn entry(&self) -> QueryEntry {
        self.observer.entry()
    }

    /// The profile, once loaded.
    pub fn user(&self) -> AppResult<Option<User>> {
        self.observer.data()
    }

    /// Wait until the profile has no fetch in flight.
    pub async fn settled(&mut self) -> QueryEntry {
        self.observer.settled().await
    }

    /// Save profile changes after checking them locally.
    pub async fn update(&self, request: UpdateProfileRequest) -> AppResult<MessageBody> {
        if let Err(err) = request.validate() {
            self.ctx.notifier.error(&err.message);
            return Err(err);
        }
        self.update.mutate_async(request).await
    }
}
