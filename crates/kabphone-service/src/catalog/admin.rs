//! The admin product form.

use std::sync::Arc;

use tracing::info;

use kabphone_auth::guard::Route;
use kabphone_cache::{Mutation, keys};
use kabphone_client::PhoneApi;
use kabphone_core::error::ErrorInfo;
use kabphone_core::result::AppResult;
use kabphone_core::types::MessageBody;
use kabphone_entity::catalog::PhoneForm;

use crate::context::{ServiceContext, display_message};

/// Writes to the catalog. Every success invalidates all phone listings.
#[derive(Debug, Clone)]
pub struct ProductAdmin {
    ctx: ServiceContext,
    create: Mutation<PhoneForm, MessageBody>,
    update: Mutation<(u64, PhoneForm), MessageBody>,
    delete: Mutation<u64, MessageBody>,
}

impl ProductAdmin {
    /// Create the service.
    pub fn new(ctx: ServiceContext, phones: PhoneApi) -> Self {
        let create = {
            let phones = phones.clone();
            Mutation::new(move |form: PhoneForm| {
                let phones = phones.clone();
                async move { phones.create(&form).await }
            })
        };
        let update = {
            let phones = phones.clone();
            Mutation::new(move |(id, form): (u64, PhoneForm)| {
                let phones = phones.clone();
                async move { phones.update(id, &form).await }
            })
        };
        let delete = Mutation::new(move |id: u64| {
            let phones = phones.clone();
            async move { phones.delete(id).await }
        });

        Self {
            create: saved(&ctx, create, "Product added successfully"),
            update: saved(&ctx, update, "Product updated successfully"),
            delete: ctx.message_mutation(
                delete,
                vec![keys::phones_prefix()],
                "Failed to delete product",
            ),
            ctx,
        }
    }

    /// Add a phone. An image is required.
    pub async fn add_product(&self, form: PhoneForm) -> AppResult<MessageBody> {
        if let Err(err) = form.validate_for_create() {
            self.ctx.notifier.error(&err.message);
            return Err(err);
        }
        self.create.mutate_async(form).await
    }

    /// Replace a phone's fields. The image is optional.
    pub async fn edit_product(&self, id: u64, form: PhoneForm) -> AppResult<MessageBody> {
        if let Err(err) = form.validate_for_update() {
            self.ctx.notifier.error(&err.message);
            return Err(err);
        }
        self.update.mutate_async((id, form)).await
    }

    /// Remove a phone.
    pub async fn delete_product(&self, id: u64) -> AppResult<MessageBody> {
        info!(phone_id = id, "Deleting product");
        self.delete.mutate_async(id).await
    }
}

/// Create and update share their settlement: refresh every listing, toast
/// a fixed message, and return to the grid.
fn saved<I>(
    ctx: &ServiceContext,
    mutation: Mutation<I, MessageBody>,
    message: &'static str,
) -> Mutation<I, MessageBody>
where
    I: Clone + Send + Sync + 'static,
{
    let cache = ctx.cache.clone();
    let navigator = Arc::clone(&ctx.navigator);
    let ok = Arc::clone(&ctx.notifier);
    let failed = Arc::clone(&ctx.notifier);
    mutation
        .on_success(move |_, _| {
            cache.invalidate(&keys::phones_prefix());
            ok.success(message);
            navigator.push(&Route::Home.path());
        })
        .on_error(move |error: &ErrorInfo, _| {
            failed.error(&display_message(error, "Failed to save product"));
        })
}
