use clap::Parser;
use contact::ContactForm;
use page::{Effect, HttpTransport, Page, PageLayout, current_year, theme::MemoryStorage};

/// Sends one contact submission to a running portfolio server.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[arg(long, default_value = "http://localhost:3001")]
    url: String,

    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    subject: String,

    #[arg(long)]
    message: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let layout = PageLayout {
        contact_form: true,
        ..PageLayout::default()
    };
    let (mut page, _) = Page::init(layout, MemoryStorage::default(), false, current_year());

    let transport = HttpTransport::new(&args.url);
    println!("Posting to {}", transport.url());

    let form = ContactForm::new(args.name, args.email, args.subject, args.message);

    for effect in page.submit(&transport, &form).await {
        match effect {
            Effect::FieldError {
                field,
                message: Some(message),
            } => println!("{}: {message}", field.id()),
            Effect::Status { text, tone } => println!("[{tone:?}] {text}"),
            Effect::FormReset => println!("Form cleared"),
            _ => {}
        }
    }

    Ok(())
}
