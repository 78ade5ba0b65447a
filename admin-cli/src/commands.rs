//! Command dispatch and terminal output

use std::sync::Arc;

use admin_client::forms::{LoginForm, ProductEditor, ProfileEditor};
use admin_client::list::{
    BlogResource, CatalogResource, ListResource, ProductResource, QueryResource,
};
use admin_client::upload::{ImagePicker, StagedFile};
use admin_client::{CatalogApi, ClientConfig, ListController, NetworkHttpClient, SessionManager};
use anyhow::{Context, bail};
use shared::FilterState;
use shared::models::{Blog, CatalogItem, CatalogKind, Product, Query};

use crate::{BlogAction, CatalogAction, Command, ProductAction, ProfileAction};

type Api = Arc<CatalogApi<NetworkHttpClient>>;

/// Page size used when a command needs every row in memory
const ALL_ROWS: u32 = 1000;

pub async fn run(config: &ClientConfig, command: Command) -> anyhow::Result<()> {
    let (api, session) = admin_client::connect(config).await?;
    let api = Arc::new(api);

    match command {
        Command::Login { email, password } => {
            let mut form = LoginForm::new(email, password);
            match form.submit(&session, &*api).await {
                Ok(admin) => println!("Logged in as {} <{}>", admin.name, admin.email),
                Err(_) => {
                    for (field, message) in form.errors.iter() {
                        eprintln!("{field}: {message}");
                    }
                    bail!(form.error.unwrap_or_else(|| "Login failed".to_string()));
                }
            }
        }
        Command::Logout => {
            session.logout().await?;
            println!("Logged out");
        }
        Command::Whoami => match session.handle().admin().await {
            Some(admin) => println!("{} <{}> ({})", admin.name, admin.email, admin.id),
            None => println!("Not logged in"),
        },
        command => {
            if !session.handle().is_authenticated().await {
                bail!("Not logged in; run `catalog-admin login` first");
            }
            run_authenticated(api, session, command).await?;
        }
    }
    Ok(())
}

async fn run_authenticated(
    api: Api,
    session: SessionManager,
    command: Command,
) -> anyhow::Result<()> {
    match command {
        Command::Catalog { kind, action } => catalog(api, kind.into(), action).await,
        Command::Product { action } => product(api, action).await,
        Command::Blog { action } => blog(api, action).await,
        Command::Queries { page, limit } => {
            let filter = FilterState::default().with_limit(limit).with_page(page);
            let list = ListController::with_filter(QueryResource::new(api), filter);
            list.refresh().await?;
            print_rows(&list, query_row).await;
            Ok(())
        }
        Command::Counts => {
            let counts = api.dashboard_counts().await?;
            println!("Products:   {}", counts.products);
            println!("Categories: {}", counts.category);
            println!("Materials:  {}", counts.material);
            Ok(())
        }
        Command::Profile { action } => profile(api, session, action).await,
        Command::Login { .. } | Command::Logout | Command::Whoami => Ok(()),
    }
}

async fn catalog(api: Api, kind: CatalogKind, action: CatalogAction) -> anyhow::Result<()> {
    let resource = CatalogResource::new(api, kind);
    if let CatalogAction::List {
        search,
        page,
        limit,
        active,
    } = action
    {
        let filter = FilterState::default()
            .with_search(search)
            .with_limit(limit)
            .with_active(active.then_some(true))
            .with_page(page);
        let list = ListController::with_filter(resource, filter);
        list.refresh().await?;
        print_rows(&list, catalog_row).await;
        return Ok(());
    }

    // Row actions look the id up in the loaded list, so load every row
    let list = ListController::with_filter(resource, FilterState::default().with_limit(ALL_ROWS));
    match action {
        CatalogAction::List { .. } => {}
        CatalogAction::Create { name } => {
            list.open_create_form().await;
            list.set_create_input(name).await;
            let item = list.create().await?;
            println!("Created {} {}", kind.label().to_lowercase(), catalog_row(&item));
        }
        CatalogAction::Rename { id, name } => {
            list.refresh().await?;
            let item = list.rename(&id, name).await?;
            println!("Renamed: {}", catalog_row(&item));
        }
        CatalogAction::Toggle { id } => {
            list.refresh().await?;
            let active = list.toggle(&id).await?;
            println!("{id} is now {}", status(active));
        }
        CatalogAction::Delete { id } => {
            list.refresh().await?;
            list.delete(&id).await?;
            println!("Deleted {id}");
        }
    }
    Ok(())
}

async fn product(api: Api, action: ProductAction) -> anyhow::Result<()> {
    match action {
        ProductAction::List { page, limit } => {
            let filter = FilterState::default().with_limit(limit).with_page(page);
            let list = ListController::with_filter(ProductResource::new(api), filter);
            list.refresh().await?;
            print_rows(&list, product_row).await;
        }
        ProductAction::Show { id } => {
            let p = api.get_product(&id).await?;
            println!("{}", product_row(&p));
            println!(
                "  category: {}  material: {}  size: {}",
                p.category,
                p.material,
                p.size.as_deref().unwrap_or("-")
            );
            if let Some(description) = p.description.as_deref().filter(|d| !d.is_empty()) {
                println!("  {description}");
            }
            for url in &p.images {
                println!("  image: {url}");
            }
        }
        ProductAction::Create {
            name,
            category,
            material,
            size,
            quantity,
            price,
            description,
            images,
        } => {
            let mut staged = Vec::with_capacity(images.len());
            for path in &images {
                let file = StagedFile::from_path(path)
                    .await
                    .with_context(|| format!("reading {}", path.display()))?;
                staged.push(file);
            }

            let mut editor = ProductEditor::create(api);
            editor.draft.name = name;
            editor.draft.category = category;
            editor.draft.material = material;
            editor.draft.size = size.unwrap_or_default();
            editor.draft.quantity_per_pack = quantity;
            editor.draft.price_per_pack = price;
            editor.draft.description = description;
            let skipped = staged.len()
                - ImagePicker::multiple().accept(staged, |files| editor.add_images(files));
            if skipped > 0 {
                eprintln!("Skipped {skipped} non-image file(s)");
            }

            match editor.submit().await {
                Ok(p) => println!("Created product {}", product_row(&p)),
                Err(e) => {
                    for (field, message) in editor.errors.iter() {
                        eprintln!("{field}: {message}");
                    }
                    return Err(e.into());
                }
            }
        }
        ProductAction::Toggle { id } => {
            let current = api.get_product(&id).await?;
            let updated = api.set_product_active(&id, !current.is_active).await?;
            println!("{id} is now {}", status(updated.is_active));
        }
        ProductAction::Delete { id } => {
            api.delete_product(&id).await?;
            println!("Deleted {id}");
        }
    }
    Ok(())
}

async fn blog(api: Api, action: BlogAction) -> anyhow::Result<()> {
    let list = ListController::with_filter(
        BlogResource::new(api),
        FilterState::default().with_limit(ALL_ROWS),
    );
    list.refresh().await?;
    match action {
        BlogAction::List => print_rows(&list, blog_row).await,
        BlogAction::Toggle { id } => {
            let active = list.toggle(&id).await?;
            println!("{id} is now {}", status(active));
        }
        BlogAction::Delete { id } => {
            list.delete(&id).await?;
            println!("Deleted {id}");
        }
    }
    Ok(())
}

async fn profile(api: Api, session: SessionManager, action: ProfileAction) -> anyhow::Result<()> {
    let mut editor = ProfileEditor::new(api, session);
    let current = editor.load().await?.clone();
    match action {
        ProfileAction::Show => {
            println!("{} <{}>", current.name, current.email);
            if let Some(last) = current.last_login {
                println!("Last login: {}", last.format("%Y-%m-%d %H:%M"));
            }
        }
        ProfileAction::Update {
            name,
            email,
            old_password,
            new_password,
        } => {
            if let Some(name) = name {
                editor.name = name;
            }
            if let Some(email) = email {
                editor.email = email;
            }
            let updated = match (old_password, new_password) {
                (Some(old), Some(new)) => {
                    editor.old_password = old;
                    editor.new_password = new;
                    editor.change_password().await
                }
                _ => editor.save().await,
            };
            match updated {
                Ok(admin) => println!("Profile saved: {} <{}>", admin.name, admin.email),
                Err(e) => {
                    if let Some(message) = editor.password_error.take() {
                        bail!(message);
                    }
                    return Err(e.into());
                }
            }
        }
    }
    Ok(())
}

async fn print_rows<R: ListResource>(list: &ListController<R>, row: fn(&R::Item) -> String) {
    let state = list.snapshot().await;
    if state.items.is_empty() {
        println!("No {} found", list.resource().plural());
    }
    for item in state.items.iter() {
        println!("{}", row(item));
    }
    if state.total_pages > 1 {
        println!("\n{}", state.page_window());
    }
}

fn status(active: bool) -> &'static str {
    if active { "active" } else { "inactive" }
}

fn catalog_row(item: &CatalogItem) -> String {
    format!("{}  {:<24} {}", item.id, item.name, status(item.is_active))
}

fn product_row(p: &Product) -> String {
    format!(
        "{}  {:<28} {:>4}/pack  {:>8.2}  {}",
        p.id,
        p.name,
        p.quantity_per_pack,
        p.price_per_pack,
        status(p.is_active)
    )
}

fn blog_row(b: &Blog) -> String {
    format!("{}  {:<32} {} block(s)  {}", b.id, b.title, b.content.len(), status(b.is_active))
}

fn query_row(q: &Query) -> String {
    let when = q
        .created_at
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    format!("{when}  {:<20} {:<28} {}\n    {}", q.full_name(), q.email, q.phone, q.message)
}
