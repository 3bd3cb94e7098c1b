mod common;

use anyhow::Result;
use common::api_for;
use httpmock::prelude::*;
use wego::core::xml;
use wego::XmlValue;

fn order() -> XmlValue {
    XmlValue::mapping()
        .with("appid", "wx2421b1c4370ec43b")
        .with("body", "腾讯充值中心-QQ会员充值")
        .with("mch_id", "10000100")
        .with("nonce_str", "1add1a30ac87aa2db72f57a2375d8fec")
        .with("notify_url", "http://wxpay.wxutil.com/pub_v2/pay/notify.v2.php")
        .with("out_trade_no", "1415659990")
        .with("spbill_create_ip", "14.23.150.211")
        .with("total_fee", 1)
        .with("trade_type", "JSAPI")
        .with("openid", "oUpF8uMuAJO_M2pxb1Q9zNjWeS6o")
        .with("sign", "0CB01533B8C1EF103065174F50BCA001")
}

#[tokio::test]
async fn test_unifiedorder_posts_encoded_xml_and_decodes_reply() -> Result<()> {
    let server = MockServer::start_async().await;
    let expected_body = xml::encode(&order());
    assert!(expected_body.starts_with("<xml><appid>wx2421b1c4370ec43b</appid><body>腾讯充值中心"));
    assert!(expected_body.ends_with("<sign>0CB01533B8C1EF103065174F50BCA001</sign></xml>"));

    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/pay/unifiedorder").body(expected_body.clone());
            then.status(200).body(
                "<xml>\
                 <return_code><![CDATA[SUCCESS]]></return_code>\
                 <return_msg><![CDATA[OK]]></return_msg>\
                 <appid><![CDATA[wx2421b1c4370ec43b]]></appid>\
                 <mch_id><![CDATA[10000100]]></mch_id>\
                 <nonce_str><![CDATA[IITRi8Iabbblz1Jc]]></nonce_str>\
                 <sign><![CDATA[7921E432F65EB8ED0CE9755F0E86D72F]]></sign>\
                 <result_code><![CDATA[SUCCESS]]></result_code>\
                 <prepay_id><![CDATA[wx201411101639507cbf6ffd8b0779950874]]></prepay_id>\
                 <trade_type><![CDATA[JSAPI]]></trade_type>\
                 </xml>",
            );
        })
        .await;

    let reply = api_for(&server).get_unifiedorder(&order()).await?;

    mock.assert_async().await;
    assert_eq!(reply.len(), 9);
    assert_eq!(reply["return_code"], "SUCCESS");
    assert_eq!(reply["prepay_id"], "wx201411101639507cbf6ffd8b0779950874");
    Ok(())
}

#[tokio::test]
async fn test_unifiedorder_failure_reply_is_returned() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/pay/unifiedorder");
            then.status(200).body(
                "<xml><return_code><![CDATA[FAIL]]></return_code>\
                 <return_msg><![CDATA[签名错误]]></return_msg></xml>",
            );
        })
        .await;

    let reply = api_for(&server).get_unifiedorder(&order()).await?;
    assert_eq!(reply["return_code"], "FAIL");
    assert_eq!(reply["return_msg"], "签名错误");
    Ok(())
}

#[tokio::test]
async fn test_unifiedorder_non_xml_reply_is_empty() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/pay/unifiedorder");
            then.status(502).body("Bad Gateway");
        })
        .await;

    let reply = api_for(&server).get_unifiedorder(&order()).await?;
    assert!(reply.is_empty());
    Ok(())
}
