use leptos::prelude::*;
use wasm_bindgen::JsValue;

static SECTIONS: [(&str, &str); 12] = [
    (
        "1. Introduction",
        "By using EyeShapeAI, you consent to the data practices described in this policy. This document outlines how we collect, use, and safeguard your information in compliance with global standards, including GDPR and CCPA.",
    ),
    (
        "2. Image Processing & Data Handling",
        "Images uploaded for eye shape analysis are processed in volatile memory (RAM) and are strictly not saved to any database or server storage. No biometric templates are created or stored. When you choose to share a result, only its text is kept, in your own browser's local storage, and it expires after seven days.",
    ),
    (
        "3. Log Files",
        "Like many other websites, we utilize log files. These files merely log visitors to the site, usually a standard procedure for hosting companies and a part of hosting services' analytics. The information collected includes IP addresses, browser type, ISP, date/time stamp, referring/exit pages, and possibly the number of clicks. This information is used to analyze trends and administer the site.",
    ),
    (
        "4. Cookies and Web Beacons",
        "We use 'cookies' to store information including visitors' preferences, and the pages on the website that the visitor accessed or visited. The information is used to optimize the users' experience by customizing our web page content based on visitors' browser type and/or other information.",
    ),
    (
        "5. Google DoubleClick DART Cookie",
        "Google is one of a third-party vendor on our site. It also uses cookies, known as DART cookies, to serve ads to our site visitors based upon their visit to our site and other sites on the internet. However, visitors may choose to decline the use of DART cookies by visiting the Google ad and content network Privacy Policy.",
    ),
    (
        "6. Advertising Partners",
        "Some of advertisers on our site may use cookies and web beacons. Our advertising partners include Google. Each of our advertising partners has their own Privacy Policy for their policies on user data. We have no access to or control over these cookies that are used by third-party advertisers.",
    ),
    (
        "7. Third Party Privacy Policies",
        "EyeShapeAI's Privacy Policy does not apply to other advertisers or websites. Thus, we are advising you to consult the respective Privacy Policies of these third-party ad servers for more detailed information. It may include their practices and instructions about how to opt-out of certain options.",
    ),
    (
        "8. CCPA Privacy Rights (Do Not Sell My Info)",
        "Under the CCPA, among other rights, California consumers have the right to: Request that a business that collects a consumer's personal data disclose the categories and specific pieces of personal data that a business has collected about consumers; Request that a business delete any personal data about the consumer that a business has collected; Request that a business that sells a consumer's personal data, not sell the consumer's personal data.",
    ),
    (
        "9. GDPR Data Protection Rights",
        "We would like to make sure you are fully aware of all of your data protection rights. Every user is entitled to the following: The right to access; The right to rectification; The right to erasure; The right to restrict processing; The right to object to processing; The right to data portability.",
    ),
    (
        "10. Children's Information",
        "Another part of our priority is adding protection for children while using the internet. We encourage parents and guardians to observe, participate in, and/or monitor and guide their online activity. We do not knowingly collect any Personal Identifiable Information from children under the age of 13.",
    ),
    (
        "11. Links to Other Websites",
        "Our Service may contain links to other sites. If you click on a third-party link, you will be directed to that site. Note that these external sites are not operated by us. Therefore, we strongly advise you to review the Privacy Policy of these websites.",
    ),
    (
        "12. Changes to This Privacy Policy",
        "We may update our Privacy Policy from time to time. Thus, you are advised to review this page periodically for any changes. We will notify you of any changes by posting the new Privacy Policy on this page. These changes are effective immediately, after they are posted on this page.",
    ),
];

#[component]
pub fn PrivacyPage() -> impl IntoView {
    let today: String = js_sys::Date::new_0()
        .to_locale_date_string("en-US", &JsValue::UNDEFINED)
        .into();

    view! {
        <div class="page privacy-page">
            <div class="card privacy-card">
                <header class="privacy-header">
                    <h1>"Privacy Policy"</h1>
                    <p class="page-description">
                        "We prioritize your trust. Our policy is transparent, compliant, and focused on protecting your digital rights."
                    </p>
                    <p class="privacy-updated">{format!("Last Updated: {}", today)}</p>
                </header>

                <div class="privacy-highlight">
                    <h3>"Commitment to Data Non-Retention"</h3>
                    <p>
                        "We do not collect or permanently store your personal data or uploaded images. Your content is processed in real-time for the sole purpose of analysis and is automatically deleted immediately after the session ends. We prioritize your anonymity and safety above all else."
                    </p>
                </div>

                {SECTIONS
                    .iter()
                    .map(|(title, content)| view! {
                        <section class="privacy-section">
                            <h2>{*title}</h2>
                            <p>{*content}</p>
                        </section>
                    })
                    .collect::<Vec<_>>()}
            </div>
        </div>
    }
}
