//! [`PageDriver`] over a WebDriver session (chromedriver or geckodriver).

use std::time::{Duration, Instant};

use fantoccini::actions::{InputSource, MouseActions, PointerAction};
use fantoccini::elements::Element;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::{json, Value};

use crate::driver::{DriverError, PageDriver};

/// WebDriver key code for Enter.
const ENTER_KEY: &str = "\u{e007}";

/// Input source id for the pointer that hovers the results panel.
const POINTER_ID: &str = "mapscrape-pointer";

const SCROLL_SCRIPT: &str = r"
    const panel = document.evaluate(
        arguments[0], document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null
    ).singleNodeValue;
    if (panel) {
        panel.scrollBy(0, arguments[1]);
    } else {
        window.scrollBy(0, arguments[1]);
    }
";

pub struct WebDriverSession {
    client: Client,
}

impl WebDriverSession {
    /// Opens a browser session on the WebDriver server at `webdriver_url`.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Session`] if the server is unreachable or
    /// refuses to start a session.
    pub async fn connect(webdriver_url: &str, headless: bool) -> Result<Self, DriverError> {
        let mut builder = ClientBuilder::native();
        builder.capabilities(capabilities(headless));

        let client = builder
            .connect(webdriver_url)
            .await
            .map_err(|e| DriverError::Session(format!("{webdriver_url}: {e}")))?;

        tracing::info!(webdriver_url, headless, "browser session started");
        Ok(Self { client })
    }
}

fn capabilities(headless: bool) -> serde_json::Map<String, Value> {
    let mut chrome_args = vec!["--window-size=1920,1080", "--lang=en-US"];
    let mut firefox_args = Vec::new();
    if headless {
        chrome_args.extend(["--headless=new", "--disable-gpu"]);
        firefox_args.push("-headless");
    }

    let caps = json!({
        "goog:chromeOptions": { "args": chrome_args },
        "moz:firefoxOptions": {
            "args": firefox_args,
            "prefs": { "intl.accept_languages": "en-US" }
        },
    });
    match caps {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    }
}

fn command(error: CmdError) -> DriverError {
    DriverError::Command(error.to_string())
}

fn move_pointer_to(element: &Element) -> MouseActions {
    MouseActions::new(POINTER_ID.to_owned()).then(PointerAction::MoveToElement {
        element: element.clone(),
        duration: None,
        x: Default::default(),
        y: Default::default(),
    })
}

impl PageDriver for WebDriverSession {
    type Element = Element;

    async fn navigate(&self, url: &str, timeout: Duration) -> Result<(), DriverError> {
        let started = Instant::now();
        match tokio::time::timeout(timeout, self.client.goto(url)).await {
            Ok(result) => result.map_err(command),
            Err(_) => Err(DriverError::Timeout {
                what: format!("navigation to {url}"),
                elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            }),
        }
    }

    async fn find_all(&self, xpath: &str) -> Result<Vec<Element>, DriverError> {
        self.client
            .find_all(Locator::XPath(xpath))
            .await
            .map_err(command)
    }

    async fn find_all_within(
        &self,
        scope: &Element,
        xpath: &str,
    ) -> Result<Vec<Element>, DriverError> {
        scope.find_all(Locator::XPath(xpath)).await.map_err(command)
    }

    async fn text(&self, element: &Element) -> Result<String, DriverError> {
        element.text().await.map_err(command)
    }

    async fn attribute(&self, element: &Element, name: &str) -> Result<Option<String>, DriverError> {
        element.attr(name).await.map_err(command)
    }

    async fn click(&self, element: &Element) -> Result<(), DriverError> {
        element.click().await.map_err(command)
    }

    async fn hover(&self, element: &Element) -> Result<(), DriverError> {
        self.client
            .perform_actions(move_pointer_to(element))
            .await
            .map_err(command)
    }

    async fn fill(&self, element: &Element, text: &str) -> Result<(), DriverError> {
        element.clear().await.map_err(command)?;
        element.send_keys(text).await.map_err(command)
    }

    async fn press_enter(&self, element: &Element) -> Result<(), DriverError> {
        element.send_keys(ENTER_KEY).await.map_err(command)
    }

    async fn scroll(&self, panel_xpath: &str, delta_y: i64) -> Result<(), DriverError> {
        self.client
            .execute(SCROLL_SCRIPT, vec![json!(panel_xpath), json!(delta_y)])
            .await
            .map(|_| ())
            .map_err(command)
    }

    async fn current_url(&self) -> Result<String, DriverError> {
        self.client
            .current_url()
            .await
            .map(|url| url.to_string())
            .map_err(command)
    }

    async fn close(self) -> Result<(), DriverError> {
        self.client.close().await.map_err(command)?;
        tracing::info!("browser session closed");
        Ok(())
    }
}
