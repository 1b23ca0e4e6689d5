// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Canned answers for domains that are not live yet
//!
//! Finance and wireless are routed but not backed by real data. A handful of
//! common questions get a demo answer; everything else gets a "coming soon"
//! notice pointing back at the live holistic domain.

use crate::models::ResponseStatus;
use crate::routing::Domain;

const FINANCE_DEMO_SOURCE: &str = "Ombee Finance Demo Data";
const WIRELESS_DEMO_SOURCE: &str = "Ombee Wireless Demo Data";
const LAUNCH_WINDOW: &str = "Q2 2026";

/// A canned answer
#[derive(Debug, Clone, PartialEq)]
pub struct DemoResponse {
    pub response: String,
    pub sources: Vec<String>,
    pub status: ResponseStatus,
}

impl DemoResponse {
    fn new(body: &str, source: &str, product: &str) -> Self {
        Self {
            response: format!(
                "{}\n\n*Note: This is demo data. Full {} integration coming {}.*",
                body.trim_end(),
                product,
                LAUNCH_WINDOW
            ),
            sources: vec![source.to_string()],
            status: ResponseStatus::Demo,
        }
    }
}

const RESTAURANT_SPENDING: &str = "\
Based on your Ombee Finance account, here's your restaurant spending for last month:

**Total Restaurant Spending: $487.32**

Top locations:
• Chipotle - $142.50 (6 visits)
• Starbucks - $98.20 (14 visits)
• Olive Garden - $87.40 (2 visits)
• Local Café - $159.22 (8 visits)

This represents 18% of your monthly food budget. You're $87 over your dining out goal of $400/month.

💡 *Tip: Consider meal prepping 2-3 times per week to reduce dining costs.*";

const BUDGET_OVERVIEW: &str = "\
Here's your Ombee Finance overview for this month:

**Monthly Budget Status:**
• Total Budget: $3,500
• Spent So Far: $2,843 (81%)
• Remaining: $657

**Top Categories:**
• Housing: $1,200 (34%)
• Food & Dining: $687 (20%)
• Transportation: $423 (12%)
• Entertainment: $312 (9%)
• Utilities: $221 (6%)

You're on track to stay within budget! 🎉";

const CURRENT_PLAN: &str = "\
Your current Ombee Wireless plan:

**Plan Details:**
• Plan Name: Unlimited Plus
• Monthly Cost: $65/month
• Data: Unlimited 5G
• Hotspot: 50GB
• International: Free texting to 200+ countries

**This Month's Usage:**
• Data Used: 42.3 GB
• Hotspot Used: 8.2 GB
• Minutes: 847 min
• Texts: 1,234 messages

Your plan is working great for your usage! All within limits. ✅";

const DATA_USAGE: &str = "\
Your Ombee Wireless data usage this month:

**Data Breakdown:**
• Total Used: 42.3 GB
• Unlimited plan - no overage charges! ✅

**Usage by App:**
• Streaming (Netflix, YouTube): 18.4 GB
• Social Media: 12.8 GB
• Web Browsing: 7.2 GB
• Maps & Navigation: 2.1 GB
• Other: 1.8 GB

**Trends:**
You're using 15% more data than last month, mainly from video streaming.";

/// Demo answer for a routed query, if one matches
pub fn demo_response(query: &str, domain: Domain) -> Option<DemoResponse> {
    let lower = query.to_lowercase();
    let has = |word: &str| lower.contains(word);

    match domain {
        Domain::Financial => {
            if has("restaurant") && (has("spend") || has("spent") || has("cost")) {
                Some(DemoResponse::new(
                    RESTAURANT_SPENDING,
                    FINANCE_DEMO_SOURCE,
                    Domain::Financial.display_name(),
                ))
            } else if has("budget") || has("spending") {
                Some(DemoResponse::new(
                    BUDGET_OVERVIEW,
                    FINANCE_DEMO_SOURCE,
                    Domain::Financial.display_name(),
                ))
            } else {
                None
            }
        }
        Domain::Telecom => {
            if has("plan") {
                Some(DemoResponse::new(
                    CURRENT_PLAN,
                    WIRELESS_DEMO_SOURCE,
                    Domain::Telecom.display_name(),
                ))
            } else if has("data") && has("usage") {
                Some(DemoResponse::new(
                    DATA_USAGE,
                    WIRELESS_DEMO_SOURCE,
                    Domain::Telecom.display_name(),
                ))
            } else {
                None
            }
        }
        Domain::Holistic => None,
    }
}

struct ProductInfo {
    name: &'static str,
    icon: &'static str,
    features: &'static str,
}

fn product_info(domain: Domain) -> ProductInfo {
    match domain {
        Domain::Financial => ProductInfo {
            name: "Ombee Finance",
            icon: "💰",
            features: "budget tracking, spending analysis, and financial insights",
        },
        Domain::Telecom => ProductInfo {
            name: "Ombee Wireless",
            icon: "📱",
            features: "plan management, usage tracking, and billing information",
        },
        Domain::Holistic => ProductInfo {
            name: "Holistic Health",
            icon: "🔄",
            features: "specialized services",
        },
    }
}

/// Notice for a domain that is still in development
pub fn coming_soon_message(domain: Domain) -> String {
    let info = product_info(domain);

    format!(
        "{icon} **{name} - Coming Soon!**

Great question about {domain} services! This feature is currently in active development as part of Ombee AI Phase 2.

**What's Coming:**
{name} will provide {features}, all integrated with your personalized AI assistant.

**Current Status:**
The Holistic Health domain is live and ready to help with wellness, nutrition, and health questions!

**Launch Timeline:**
{name} is planned for {launch}.

In the meantime, feel free to ask me anything about holistic health, nutrition, meditation, sleep, or wellness! 🧘‍♀️

*Stay tuned for updates on {name}!*",
        icon = info.icon,
        name = info.name,
        domain = domain,
        features = info.features,
        launch = LAUNCH_WINDOW,
    )
}
