use std::thread;
use std::time::{Duration, Instant};

use thirtyfour::prelude::*;
use thirtyfour::ChromiumLikeCapabilities;
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info, warn};

use crate::config::{Credentials, Settings};
use crate::error::{SessionError, SessionResult};
use crate::scroll::ScrollDriver;

pub const LOGIN_URL: &str = "https://www.linkedin.com/login";

const POLL_INTERVAL: Duration = Duration::from_millis(250);
const CLICK_PAUSE: Duration = Duration::from_millis(750);
const HEIGHT_SCRIPT: &str = "return document.body.scrollHeight;";
const SCROLL_SCRIPT: &str = "window.scrollTo(0, document.body.scrollHeight);";

/// Everything the harvester needs from a browser tab. Extraction never
/// goes through this trait: it works on [`Page::source`] snapshots.
pub trait Page: ScrollDriver {
    fn goto(&mut self, url: &str) -> SessionResult<()>;
    fn current_url(&mut self) -> SessionResult<String>;
    fn source(&mut self) -> SessionResult<String>;
    /// Poll until any selector matches. `false` when `timeout` runs out.
    fn wait_for_any(&mut self, selectors: &[&str], timeout: Duration) -> SessionResult<bool>;
    /// Click the first element matched by the first selector that matches
    /// anything. Returns whether something was clicked.
    fn click_first(&mut self, selectors: &[&str]) -> SessionResult<bool>;
    /// Click every element matched by any selector.
    fn click_all(&mut self, selectors: &[&str]) -> SessionResult<usize>;
    fn fill(&mut self, selector: &str, text: &str) -> SessionResult<()>;
}

/// Chrome driven over WebDriver (chromedriver must be listening at
/// `Settings::webdriver_url`). The browser is shut down on drop.
pub struct ChromeSession {
    runtime: Runtime,
    driver: Option<WebDriver>,
    settle_delay: Duration,
}

fn chrome_args(headless: bool) -> Vec<&'static str> {
    let mut args = vec![
        "--no-sandbox",
        "--disable-dev-shm-usage",
        "--disable-blink-features=AutomationControlled",
        "--window-size=1920,1080",
    ];
    if headless {
        args.push("--headless=new");
    }
    args
}

impl ChromeSession {
    pub fn launch(settings: &Settings) -> SessionResult<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;

        let mut caps = DesiredCapabilities::chrome();
        for arg in chrome_args(settings.headless) {
            caps.add_arg(arg)?;
        }

        info!(target: "harvest.session", endpoint = %settings.webdriver_url, headless = settings.headless, "Launching browser");
        let driver = runtime
            .block_on(WebDriver::new(settings.webdriver_url.as_str(), caps))
            .map_err(|e| SessionError::Launch {
                endpoint: settings.webdriver_url.clone(),
                reason: e.to_string(),
            })?;
        runtime.block_on(driver.set_page_load_timeout(settings.page_load_timeout))?;

        Ok(ChromeSession {
            runtime,
            driver: Some(driver),
            settle_delay: settings.settle_delay,
        })
    }

    fn driver(&self) -> SessionResult<&WebDriver> {
        self.driver.as_ref().ok_or(SessionError::Closed)
    }

    fn script_number(&self, script: &str) -> SessionResult<u64> {
        let driver = self.driver()?;
        let ret = self.runtime.block_on(driver.execute(script, Vec::new()))?;
        ret.json()
            .as_f64()
            .map(|n| n as u64)
            .ok_or_else(|| SessionError::Script {
                script: script.to_string(),
            })
    }

    fn elements(&self, selector: &str) -> SessionResult<Vec<WebElement>> {
        let driver = self.driver()?;
        Ok(self.runtime.block_on(driver.find_all(By::Css(selector)))?)
    }

    fn js_click(&self, element: &WebElement) -> SessionResult<()> {
        let driver = self.driver()?;
        let arg = element.to_json()?;
        self.runtime
            .block_on(driver.execute("arguments[0].click();", vec![arg]))?;
        Ok(())
    }

    /// Quit the browser now instead of at drop.
    pub fn close(mut self) -> SessionResult<()> {
        match self.driver.take() {
            Some(driver) => {
                info!(target: "harvest.session", "Closing browser");
                Ok(self.runtime.block_on(driver.quit())?)
            }
            None => Ok(()),
        }
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        if let Some(driver) = self.driver.take() {
            if let Err(e) = self.runtime.block_on(driver.quit()) {
                warn!(target: "harvest.session", error = %e, "Failed to quit browser cleanly");
            }
        }
    }
}

impl ScrollDriver for ChromeSession {
    fn scroll_to_bottom(&mut self) -> SessionResult<()> {
        let driver = self.driver()?;
        self.runtime.block_on(driver.execute(SCROLL_SCRIPT, Vec::new()))?;
        Ok(())
    }

    fn page_height(&mut self) -> SessionResult<u64> {
        self.script_number(HEIGHT_SCRIPT)
    }

    fn count(&mut self, selector: &str) -> SessionResult<usize> {
        Ok(self.elements(selector)?.len())
    }

    fn pause(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

impl Page for ChromeSession {
    fn goto(&mut self, url: &str) -> SessionResult<()> {
        debug!(target: "harvest.session", %url, "Navigating");
        let driver = self.driver()?;
        self.runtime
            .block_on(driver.goto(url))
            .map_err(|e| SessionError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        thread::sleep(self.settle_delay);
        Ok(())
    }

    fn current_url(&mut self) -> SessionResult<String> {
        let driver = self.driver()?;
        Ok(self.runtime.block_on(driver.current_url())?.to_string())
    }

    fn source(&mut self) -> SessionResult<String> {
        let driver = self.driver()?;
        Ok(self.runtime.block_on(driver.source())?)
    }

    fn wait_for_any(&mut self, selectors: &[&str], timeout: Duration) -> SessionResult<bool> {
        let deadline = Instant::now() + timeout;
        loop {
            for selector in selectors {
                if !self.elements(selector)?.is_empty() {
                    debug!(target: "harvest.session", %selector, "Element present");
                    return Ok(true);
                }
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    fn click_first(&mut self, selectors: &[&str]) -> SessionResult<bool> {
        for selector in selectors {
            let Some(element) = self.elements(selector)?.into_iter().next() else {
                continue;
            };
            let clicked = self.runtime.block_on(element.click());
            match clicked {
                Ok(()) => {}
                Err(e) => {
                    debug!(target: "harvest.session", %selector, error = %e, "Native click failed, trying script click");
                    if self.js_click(&element).is_err() {
                        continue;
                    }
                }
            }
            info!(target: "harvest.session", %selector, "Clicked");
            thread::sleep(CLICK_PAUSE);
            return Ok(true);
        }
        Ok(false)
    }

    fn click_all(&mut self, selectors: &[&str]) -> SessionResult<usize> {
        let mut clicked = 0;
        for selector in selectors {
            for element in self.elements(selector)? {
                if self.js_click(&element).is_ok() {
                    clicked += 1;
                    thread::sleep(CLICK_PAUSE);
                }
            }
        }
        debug!(target: "harvest.session", clicked, "Expanded sections");
        Ok(clicked)
    }

    fn fill(&mut self, selector: &str, text: &str) -> SessionResult<()> {
        let driver = self.driver()?;
        let element = self.runtime.block_on(driver.find(By::Css(selector)))?;
        self.runtime.block_on(element.send_keys(text))?;
        Ok(())
    }
}

const USERNAME_FIELD: &str = "#username";
const PASSWORD_FIELD: &str = "#password";
const SUBMIT_BUTTON: &str = "button[type='submit']";
const LOGGED_IN_MARKERS: &[&str] = &[".feed-shared-update-v2", ".pv-top-card", "#global-nav"];

/// Sign in with `creds`. The session is rejected if the site keeps us on
/// the login form or sends us to a security checkpoint.
pub fn login<P: Page + ?Sized>(page: &mut P, creds: &Credentials, settings: &Settings) -> SessionResult<()> {
    info!(target: "harvest.session", email = %creds.email, "Logging in");
    page.goto(LOGIN_URL)?;
    if !page.wait_for_any(&[USERNAME_FIELD], settings.element_timeout)? {
        return Err(SessionError::Timeout {
            what: "login form".to_string(),
        });
    }
    page.fill(USERNAME_FIELD, &creds.email)?;
    page.fill(PASSWORD_FIELD, &creds.password)?;
    if !page.click_first(&[SUBMIT_BUTTON])? {
        return Err(SessionError::Timeout {
            what: "login submit button".to_string(),
        });
    }

    let landed = page.wait_for_any(LOGGED_IN_MARKERS, settings.element_timeout)?;
    let url = page.current_url()?;
    if url.contains("linkedin.com/login") || url.contains("/checkpoint") {
        return Err(SessionError::LoginRejected { url });
    }
    if !landed && !url.contains("/feed") {
        warn!(target: "harvest.session", %url, "Login finished on an unexpected page");
    }
    info!(target: "harvest.session", "Login successful");
    Ok(())
}
