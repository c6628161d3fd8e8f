//! Headless Chromium rendering
//!
//! The generator talks to the browser through [`RenderEngine`] so a run can be
//! driven by a fake in tests. [`ChromeRenderer`] is the real thing: one
//! Chromium process, one emulated viewport and one page, reused for every
//! mockup in the run.

use crate::{create_browser_config, file_url, Config, GeneratorError, Viewport};
use async_trait::async_trait;
use chromiumoxide::browser::Browser;
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::page::{
    CaptureScreenshotFormat, EventLifecycleEvent, SetLifecycleEventsEnabledParams,
};
use chromiumoxide::page::{Page, ScreenshotParams};
use futures::StreamExt;
use std::path::Path;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, info, warn};

const NETWORK_IDLE: &str = "networkIdle";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RenderEngine: Send {
    /// Load a local HTML file and wait until its network activity is idle.
    async fn navigate(&mut self, path: &Path) -> Result<(), GeneratorError>;

    /// Write a PNG of the current page to `output`.
    async fn capture(&mut self, output: &Path, full_page: bool) -> Result<(), GeneratorError>;

    /// Release the page and the browser behind it.
    async fn close(&mut self) -> Result<(), GeneratorError>;
}

pub struct ChromeRenderer {
    browser: Browser,
    handler: JoinHandle<()>,
    page: Page,
    navigation_timeout: Duration,
}

impl ChromeRenderer {
    pub async fn launch(config: &Config, viewport: &Viewport) -> Result<Self, GeneratorError> {
        let browser_config = create_browser_config(config, viewport)?;

        let (mut browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| GeneratorError::BrowserLaunchFailed(e.to_string()))?;

        // The handler drives the DevTools connection and must be polled for
        // the browser to respond at all.
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("CDP handler error: {}", e);
                }
            }
            debug!("CDP handler stream ended");
        });

        let page = match open_page(&browser, viewport).await {
            Ok(page) => page,
            Err(e) => {
                let _ = browser.close().await;
                handler.abort();
                return Err(e);
            }
        };

        info!(
            "Browser ready ({}x{} @ {}x)",
            viewport.width, viewport.height, viewport.device_scale_factor
        );

        Ok(Self {
            browser,
            handler,
            page,
            navigation_timeout: config.navigation_timeout,
        })
    }

    async fn load(&self, url: &str) -> Result<(), GeneratorError> {
        let mut events = self
            .page
            .event_listener::<EventLifecycleEvent>()
            .await
            .map_err(|e| GeneratorError::NavigationFailed(e.to_string()))?;

        self.page
            .goto(url)
            .await
            .map_err(|e| GeneratorError::NavigationFailed(e.to_string()))?;

        let main_frame = self
            .page
            .mainframe()
            .await
            .map_err(|e| GeneratorError::NavigationFailed(e.to_string()))?;

        // Lifecycle events of the previous document may still be queued; only
        // an idle signal from the loader started after "init" counts.
        let mut loader = None;
        while let Some(event) = events.next().await {
            if main_frame.as_ref().is_some_and(|frame| *frame != event.frame_id) {
                continue;
            }
            match event.name.as_str() {
                "init" => loader = Some(event.loader_id.clone()),
                NETWORK_IDLE if loader.as_ref() == Some(&event.loader_id) => return Ok(()),
                _ => {}
            }
        }

        Err(GeneratorError::NavigationFailed(
            "page closed before network became idle".to_string(),
        ))
    }
}

async fn open_page(browser: &Browser, viewport: &Viewport) -> Result<Page, GeneratorError> {
    let page = browser
        .new_page("about:blank")
        .await
        .map_err(|e| GeneratorError::PageError(e.to_string()))?;

    let emulation_params = SetDeviceMetricsOverrideParams::builder()
        .width(viewport.width)
        .height(viewport.height)
        .device_scale_factor(viewport.device_scale_factor)
        .mobile(false)
        .build()
        .map_err(GeneratorError::PageError)?;

    page.execute(emulation_params)
        .await
        .map_err(|e| GeneratorError::PageError(e.to_string()))?;

    page.execute(SetLifecycleEventsEnabledParams::new(true))
        .await
        .map_err(|e| GeneratorError::PageError(e.to_string()))?;

    Ok(page)
}

#[async_trait]
impl RenderEngine for ChromeRenderer {
    async fn navigate(&mut self, path: &Path) -> Result<(), GeneratorError> {
        let url = file_url(path)?;
        debug!("Navigating to {}", url);

        match timeout(self.navigation_timeout, self.load(url.as_str())).await {
            Ok(result) => result,
            Err(_) => Err(GeneratorError::Timeout(self.navigation_timeout)),
        }
    }

    async fn capture(&mut self, output: &Path, full_page: bool) -> Result<(), GeneratorError> {
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(full_page)
            .build();

        let png_data = self
            .page
            .screenshot(params)
            .await
            .map_err(|e| GeneratorError::CaptureFailed(e.to_string()))?;

        tokio::fs::write(output, &png_data)
            .await
            .map_err(|e| GeneratorError::CaptureFailed(format!("{}: {}", output.display(), e)))?;

        debug!("Wrote {} bytes to {}", png_data.len(), output.display());
        Ok(())
    }

    async fn close(&mut self) -> Result<(), GeneratorError> {
        if let Err(e) = self.page.clone().close().await {
            warn!("Failed to close page: {}", e);
        }

        let result = self
            .browser
            .close()
            .await
            .map(|_| ())
            .map_err(|e| GeneratorError::BrowserError(e.to_string()));

        if let Err(e) = self.browser.wait().await {
            debug!("Browser process wait failed: {}", e);
        }
        self.handler.abort();

        info!("Browser closed");
        result
    }
}
